// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-lifetime state shared by the player widgets: a keyed store for per-clip
//! settings, unique ids, and namespaced player events.

use serde_json::json;
use vantage_events::{EventBus, ListenerError};
use vantage_store::{KeyGenerator, KeyedStore, inspect};

fn main() {
    vantage_demos::init_logging();

    let mut settings: KeyedStore<f64> = KeyedStore::new();
    if let Err(err) = settings.set(&json!({ "clip": "intro", "setting": "volume" }), 0.4) {
        tracing::error!(error = %err, "could not store setting");
        return;
    }
    let volume = settings.get(&json!({ "setting": "volume", "clip": "intro" }));
    tracing::info!(?volume, "restored volume");

    let mut ids = KeyGenerator::new();
    let dom_id = ids.generate();
    tracing::info!(%dom_id, issued = ids.issued_count(), "generated element id");

    let bus: EventBus<serde_json::Value> = EventBus::new();
    let intro = bus.attach_to("player_");
    intro.on("ended", |payload| {
        if inspect::is_empty(payload) {
            return Err(ListenerError::new("ended without a position"));
        }
        tracing::info!(position = %inspect::string_value(payload), "intro ended");
        Ok(())
    });

    let ok = intro.call_event("ended", &json!(12.5));
    let failed = intro.call_event("ended", &serde_json::Value::Null);
    tracing::info!(ok, failed, "dispatched");

    // A global listener with the same name does not see scoped events.
    bus.on("ended", |_| Ok(()));
    tracing::info!(
        global = bus.listener_count("ended"),
        scoped = intro.listener_count("ended"),
        "listeners"
    );
}
