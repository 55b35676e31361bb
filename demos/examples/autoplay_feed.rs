// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A feed of video clips that autoplays whichever clip is nearest the middle of the
//! screen while the user scrolls.
//!
//! The window is an `EventBus<Trigger>`; each player talks to its own scoped view of a
//! second bus, the way independent widgets on a media page would.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use vantage_events::EventBus;
use vantage_proximity::adapters::event_bus::dispatch;
use vantage_proximity::page::{Page, PageScheduler};
use vantage_proximity::{Candidate, Scheduler, Trigger};

const CLIPS: u32 = 6;
const CLIP_HEIGHT: f64 = 360.0;
const GAP: f64 = 140.0;

fn main() {
    vantage_demos::init_logging();

    let page = Rc::new(Page::new(800.0));
    let window: EventBus<Trigger> = EventBus::new();
    let players: EventBus<String> = EventBus::new();

    let scheduler: Rc<RefCell<PageScheduler>> =
        Rc::new(RefCell::new(Scheduler::new(Rc::clone(&page))));
    let subscribed = Scheduler::listen(&scheduler, &window);
    tracing::info!(subscribed, "scheduler listening on the window");

    for i in 0..CLIPS {
        let key = format!("clip-{i}");
        let top = 80.0 + f64::from(i) * (CLIP_HEIGHT + GAP);
        let element = page.insert(&key, Rect::new(0.0, top, 640.0, top + CLIP_HEIGHT));

        let view = players.attach_to("player_");
        let name = key.clone();
        view.on("state", move |state: &String| {
            tracing::info!(clip = %name, %state, "player");
            Ok(())
        });

        let (play, pause) = (view.clone(), view);
        let candidate = Candidate::new(
            element,
            move || {
                play.call_event("state", &"playing".to_owned());
            },
            move || {
                pause.call_event("state", &"paused".to_owned());
            },
        );
        scheduler.borrow_mut().add(&key, candidate);
    }

    // The last clip only reacts to real scrolling, not to pointer chatter.
    scheduler
        .borrow_mut()
        .set_only_scroll_trigger(&format!("clip-{}", CLIPS - 1));

    for offset in [0.0, 250.0, 500.0, 1200.0, 1800.0, 2400.0, 600.0] {
        page.scroll_to(offset);
        dispatch(&window, Trigger::Scroll);
        dispatch(&window, Trigger::MouseMove);
        let s = scheduler.borrow();
        tracing::info!(
            offset,
            active = s.active_key().unwrap_or("-"),
            distance = s.active_distance(),
            "scrolled"
        );
    }
}
