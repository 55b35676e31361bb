// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An `EventBus<Trigger>` standing in for the window.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::Rect;
use vantage_events::{EventBus, ListenerError};
use vantage_proximity::adapters::event_bus::{dispatch, dispatch_named};
use vantage_proximity::page::{Page, PageScheduler};
use vantage_proximity::{Candidate, Scheduler, SchedulerConfig, Trigger, TriggerSet};

fn counting(counter: &Rc<Cell<u32>>) -> impl FnMut() + 'static {
    let counter = Rc::clone(counter);
    move || counter.set(counter.get() + 1)
}

#[test]
fn scheduler_runs_when_bus_publishes_triggers() {
    let page = Rc::new(Page::new(800.0));
    let bus: EventBus<Trigger> = EventBus::new();
    let scheduler: Rc<RefCell<PageScheduler>> =
        Rc::new(RefCell::new(Scheduler::new(Rc::clone(&page))));
    assert_eq!(Scheduler::listen(&scheduler, &bus), Trigger::ALL.len());

    let (on, off) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let clip = page.insert("clip", Rect::new(0.0, 300.0, 640.0, 500.0));
    scheduler
        .borrow_mut()
        .add("clip", Candidate::new(clip, counting(&on), counting(&off)));

    // Scrolling the page alone does not reach a scheduler wired to the bus.
    page.scroll_to(0.0);
    assert_eq!(on.get(), 0);

    assert_eq!(dispatch(&bus, Trigger::Scroll), 1);
    assert_eq!(scheduler.borrow().active_key(), Some("clip"));
    assert_eq!(on.get(), 2);

    page.scroll_to(700.0);
    assert_eq!(dispatch_named(&bus, "keyup"), Some(1));
    assert_eq!(off.get(), 1);
    assert_eq!(scheduler.borrow().active_key(), None);
}

#[test]
fn other_bus_listeners_share_the_trigger_stream() {
    let page = Rc::new(Page::new(800.0));
    let bus: EventBus<Trigger> = EventBus::new();
    let config = SchedulerConfig {
        triggers: TriggerSet::SCROLL,
        ..SchedulerConfig::default()
    };
    let scheduler = Rc::new(RefCell::new(Scheduler::with_config(
        Rc::clone(&page),
        config,
    )));
    assert_eq!(Scheduler::listen(&scheduler, &bus), 1);

    let analytics = Rc::new(Cell::new(0));
    let a = Rc::clone(&analytics);
    bus.on("scroll", move |_: &Trigger| {
        a.set(a.get() + 1);
        Ok(())
    });
    bus.on("scroll", |_: &Trigger| Err(ListenerError::new("offline")));

    // The failing listener is isolated; the scheduler and analytics both ran.
    assert_eq!(dispatch(&bus, Trigger::Scroll), 2);
    assert_eq!(analytics.get(), 1);
    assert_eq!(dispatch(&bus, Trigger::Click), 0);
}

#[test]
fn scoped_views_do_not_receive_window_triggers() {
    let bus: EventBus<Trigger> = EventBus::new();
    let player = bus.attach_to("player_");
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    player.on("scroll", move |_| {
        h.set(h.get() + 1);
        Ok(())
    });
    assert_eq!(dispatch(&bus, Trigger::Scroll), 0);
    assert_eq!(player.call_event("scroll", &Trigger::Scroll), 1);
    assert_eq!(hits.get(), 1);
}
