// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bus implementation: listener storage, dispatch, and namespacing.

use std::cell::RefCell;
use std::rc::Rc;

use vantage_store::{CacheKey, KeyGenerator, KeyedStore};

use crate::scoped::Scoped;

/// Failure reported by a listener.
///
/// Listener failures never reach the caller of [`EventBus::call_event`]; they are
/// logged and the dispatch moves on to the next listener.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A plain failure message.
    #[error("{0}")]
    Message(String),
    /// An underlying error.
    #[error("{0}")]
    Source(#[source] Box<dyn std::error::Error>),
}

impl ListenerError {
    /// Failure with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Failure wrapping another error.
    pub fn other(err: impl std::error::Error + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}

type Callback<P> = dyn FnMut(&P) -> Result<(), ListenerError>;
type Listener<P> = Rc<RefCell<Callback<P>>>;

struct Inner<P> {
    lists: KeyedStore<Vec<Listener<P>>>,
    keys: KeyGenerator,
    // Private prefix for this bus's listener lists inside `lists`.
    slot: String,
}

impl<P> Inner<P> {
    fn list_key(&self, event: &str) -> CacheKey {
        CacheKey::from_name(&format!("{}{event}", self.slot))
    }
}

/// Named-event publish/subscribe bus.
///
/// Cloning produces another handle to the same bus.
pub struct EventBus<P> {
    inner: Rc<RefCell<Inner<P>>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> core::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventBus")
            .field("slot", &inner.slot)
            .field("event_names", &inner.lists.len())
            .finish_non_exhaustive()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventBus<P> {
    /// Create an empty bus with its own key generator.
    pub fn new() -> Self {
        Self::with_key_generator(KeyGenerator::new())
    }

    /// Create an empty bus drawing namespace tokens from `keys`.
    pub fn with_key_generator(mut keys: KeyGenerator) -> Self {
        let slot = format!("custom_events_list{}", keys.generate());
        Self {
            inner: Rc::new(RefCell::new(Inner {
                lists: KeyedStore::new(),
                keys,
                slot,
            })),
        }
    }

    /// Register `callback` for `event`.
    ///
    /// Returns false (and registers nothing) if `event` is empty.
    pub fn on(
        &self,
        event: &str,
        callback: impl FnMut(&P) -> Result<(), ListenerError> + 'static,
    ) -> bool {
        if event.is_empty() {
            return false;
        }
        let listener: Listener<P> = Rc::new(RefCell::new(callback));
        let mut inner = self.inner.borrow_mut();
        let key = inner.list_key(event);
        inner
            .lists
            .get_key_or_insert_with(key, Vec::new)
            .push(listener);
        true
    }

    /// Invoke every callback registered for `event`, in registration order.
    ///
    /// Returns the number of callbacks that ran and returned `Ok`.
    /// An empty or unknown `event` is a no-op.
    pub fn call_event(&self, event: &str, payload: &P) -> usize {
        if event.is_empty() {
            return 0;
        }
        let listeners = {
            let inner = self.inner.borrow();
            match inner.lists.get_key(&inner.list_key(event)) {
                Some(list) => list.clone(),
                None => return 0,
            }
        };

        let mut completed = 0;
        for (position, listener) in listeners.iter().enumerate() {
            let Ok(mut callback) = listener.try_borrow_mut() else {
                tracing::warn!(
                    target: "vantage.events",
                    event,
                    position,
                    "listener is already running; skipping nested dispatch"
                );
                continue;
            };
            match (*callback)(payload) {
                Ok(()) => completed += 1,
                Err(err) => {
                    tracing::error!(
                        target: "vantage.events",
                        event,
                        position,
                        error = %err,
                        "listener failed"
                    );
                }
            }
        }
        completed
    }

    /// Drop every callback registered for `event`.
    ///
    /// Returns true if any were registered.
    pub fn remove_all_events(&self, event: &str) -> bool {
        if event.is_empty() {
            return false;
        }
        let mut inner = self.inner.borrow_mut();
        let key = inner.list_key(event);
        inner.lists.delete_key(&key).is_some()
    }

    /// Number of callbacks registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        let inner = self.inner.borrow();
        inner
            .lists
            .get_key(&inner.list_key(event))
            .map_or(0, Vec::len)
    }

    /// Create a namespaced view of this bus.
    ///
    /// The namespace is `prefix` followed by a freshly generated key, so two views never
    /// share event names even when created with the same prefix.
    pub fn attach_to(&self, prefix: &str) -> Scoped<P> {
        let token = self.inner.borrow_mut().keys.generate();
        Scoped::new(self.clone(), format!("{prefix}{token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        tag: &'static str,
    ) -> impl FnMut(&u8) -> Result<(), ListenerError> + 'static {
        let log = Rc::clone(log);
        move |_| {
            log.borrow_mut().push(tag);
            Ok(())
        }
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        assert!(bus.on("tick", recorder(&log, "a")));
        assert!(bus.on("tick", recorder(&log, "b")));
        assert!(bus.on("other", recorder(&log, "x")));
        assert!(bus.on("tick", recorder(&log, "c")));
        assert_eq!(bus.call_event("tick", &0), 3);
        assert_eq!(*log.borrow(), ["a", "b", "c"]);
    }

    #[test]
    fn payload_reaches_every_listener() {
        let bus: EventBus<(u32, &'static str)> = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            bus.on("params", move |(n, s)| {
                seen.borrow_mut().push(format!("{n}:{s}"));
                Ok(())
            });
        }
        bus.call_event("params", &(7, "seven"));
        assert_eq!(*seen.borrow(), ["7:seven", "7:seven"]);
    }

    #[test]
    fn failing_listener_does_not_stop_siblings() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on("tick", recorder(&log, "before"));
        bus.on("tick", |_: &u8| Err(ListenerError::new("boom")));
        bus.on("tick", |_: &u8| Err(ListenerError::other(std::fmt::Error)));
        bus.on("tick", recorder(&log, "after"));
        assert_eq!(bus.call_event("tick", &0), 2);
        assert_eq!(*log.borrow(), ["before", "after"]);
    }

    #[test]
    fn empty_event_names_are_ignored() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        assert!(!bus.on("", recorder(&log, "never")));
        assert_eq!(bus.call_event("", &0), 0);
        assert!(!bus.remove_all_events(""));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_event_is_a_no_op() {
        let bus: EventBus<u8> = EventBus::new();
        assert_eq!(bus.call_event("missing", &0), 0);
        assert!(!bus.remove_all_events("missing"));
    }

    #[test]
    fn remove_all_events_clears_only_that_name() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on("a", recorder(&log, "a1"));
        bus.on("a", recorder(&log, "a2"));
        bus.on("b", recorder(&log, "b"));
        assert!(bus.remove_all_events("a"));
        assert_eq!(bus.listener_count("a"), 0);
        assert_eq!(bus.call_event("a", &0), 0);
        assert_eq!(bus.call_event("b", &0), 1);
        assert_eq!(*log.borrow(), ["b"]);
    }

    #[test]
    fn listener_registered_during_dispatch_runs_next_time() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let (b, h) = (bus.clone(), Rc::clone(&hits));
        bus.on("tick", move |_: &u8| {
            let h = Rc::clone(&h);
            b.on("tick", move |_| {
                h.set(h.get() + 1);
                Ok(())
            });
            Ok(())
        });
        assert_eq!(bus.call_event("tick", &0), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.call_event("tick", &0), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn nested_dispatch_skips_running_listener() {
        let bus = EventBus::new();
        let depth = Rc::new(Cell::new(0));
        let (b, d) = (bus.clone(), Rc::clone(&depth));
        bus.on("echo", move |_: &u8| {
            d.set(d.get() + 1);
            // The nested call cannot re-enter this listener.
            assert_eq!(b.call_event("echo", &0), 0);
            Ok(())
        });
        assert_eq!(bus.call_event("echo", &0), 1);
        assert_eq!(depth.get(), 1);
    }
}
