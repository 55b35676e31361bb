// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Use a Vantage event bus as the window the scheduler listens on.
//!
//! ## Feature
//!
//! Enable with `event_bus_adapter`.
//!
//! ## Notes
//!
//! An `EventBus<Trigger>` carries each trigger under its DOM event name (`"scroll"`,
//! `"touchstart"`, ...), with the trigger itself as the payload. Anything else on the
//! page that already talks to the bus can then drive the scheduler, and vice versa.

use vantage_events::EventBus;

use crate::types::{EventTarget, Trigger};

impl EventTarget for EventBus<Trigger> {
    fn add_listener(&self, trigger: Trigger, mut listener: Box<dyn FnMut(Trigger)>) {
        self.on(trigger.name(), move |fired: &Trigger| {
            listener(*fired);
            Ok(())
        });
    }
}

/// Publish `trigger` on `bus`. Returns the number of listeners that ran.
pub fn dispatch(bus: &EventBus<Trigger>, trigger: Trigger) -> usize {
    bus.call_event(trigger.name(), &trigger)
}

/// Publish the trigger named `name` on `bus`.
///
/// Returns `None` if `name` is not a known trigger.
pub fn dispatch_named(bus: &EventBus<Trigger>, name: &str) -> Option<usize> {
    Trigger::from_name(name).map(|trigger| dispatch(bus, trigger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_receive_the_trigger_by_name() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        bus.add_listener(
            Trigger::TouchMove,
            Box::new(move |t| s.borrow_mut().push(t)),
        );

        assert_eq!(bus.listener_count("touchmove"), 1);
        assert_eq!(dispatch(&bus, Trigger::TouchMove), 1);
        assert_eq!(dispatch(&bus, Trigger::Scroll), 0);
        assert_eq!(dispatch_named(&bus, "touchmove"), Some(1));
        assert_eq!(dispatch_named(&bus, "hashchange"), None);
        assert_eq!(*seen.borrow(), [Trigger::TouchMove, Trigger::TouchMove]);
    }
}
