// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_events --heading-base-level=0

//! Vantage Events: a named-event publish/subscribe bus.
//!
//! ## Overview
//!
//! - [`EventBus::on`] registers a callback under an event name.
//! - [`EventBus::call_event`] runs every callback for a name, in registration order.
//! - [`EventBus::remove_all_events`] drops every callback for a name.
//! - [`EventBus::attach_to`] hands out a [`Scoped`] view whose event names live in a
//!   private namespace, so a component can own events that never collide with global
//!   names or with another component's names.
//!
//! ## Failure isolation
//!
//! Callbacks return `Result<(), ListenerError>`.
//! An `Err` is logged through `tracing` and swallowed: the remaining callbacks still run
//! and the caller of [`EventBus::call_event`] only sees how many callbacks succeeded.
//!
//! ## Re-entrancy
//!
//! Dispatch walks a snapshot of the listener list, so callbacks may register or remove
//! listeners on the same bus. Changes take effect from the next dispatch.
//! A callback that triggers its own event again is skipped for the nested dispatch.
//!
//! The bus is a cheap `Rc` handle for single-threaded, event-loop style code.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use vantage_events::{EventBus, ListenerError};
//!
//! let bus: EventBus<u32> = EventBus::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let t = total.clone();
//! bus.on("scrolled_25_percent", move |pct| {
//!     t.set(t.get() + *pct);
//!     Ok(())
//! });
//! bus.on("scrolled_25_percent", |_| Err(ListenerError::new("analytics offline")));
//!
//! // The failing listener is logged and isolated.
//! assert_eq!(bus.call_event("scrolled_25_percent", &25), 1);
//! assert_eq!(total.get(), 25);
//!
//! // A scoped view never sees global events of the same name.
//! let player = bus.attach_to("player_");
//! player.on("scrolled_25_percent", |_| Ok(()));
//! assert_eq!(player.call_event("scrolled_25_percent", &0), 1);
//! assert_eq!(bus.listener_count("scrolled_25_percent"), 2);
//! ```

mod bus;
mod scoped;

pub use bus::{EventBus, ListenerError};
pub use scoped::Scoped;
