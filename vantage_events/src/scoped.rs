// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespaced view of an [`EventBus`].

use crate::bus::{EventBus, ListenerError};

/// A view of an [`EventBus`] whose event names live in a private namespace.
///
/// Created by [`EventBus::attach_to`]. Every event name passed to a `Scoped` is prefixed
/// with its namespace before it reaches the bus, so `"play"` on one view, `"play"` on
/// another view, and the global `"play"` are three unrelated events.
pub struct Scoped<P> {
    bus: EventBus<P>,
    namespace: String,
}

impl<P> core::fmt::Debug for Scoped<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scoped")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<P> Clone for Scoped<P> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl<P> Scoped<P> {
    pub(crate) fn new(bus: EventBus<P>, namespace: String) -> Self {
        Self { bus, namespace }
    }

    /// The private namespace token prepended to every event name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register `callback` for the scoped `event`. See [`EventBus::on`].
    pub fn on(
        &self,
        event: &str,
        callback: impl FnMut(&P) -> Result<(), ListenerError> + 'static,
    ) -> bool {
        match self.scoped(event) {
            Some(name) => self.bus.on(&name, callback),
            None => false,
        }
    }

    /// Dispatch the scoped `event`. See [`EventBus::call_event`].
    pub fn call_event(&self, event: &str, payload: &P) -> usize {
        self.scoped(event)
            .map_or(0, |name| self.bus.call_event(&name, payload))
    }

    /// Drop every callback for the scoped `event`. See [`EventBus::remove_all_events`].
    pub fn remove_all_events(&self, event: &str) -> bool {
        self.scoped(event)
            .is_some_and(|name| self.bus.remove_all_events(&name))
    }

    /// Number of callbacks registered for the scoped `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.scoped(event)
            .map_or(0, |name| self.bus.listener_count(&name))
    }

    // Empty names stay rejected even though the namespace alone would be non-empty.
    fn scoped(&self, event: &str) -> Option<String> {
        (!event.is_empty()).then(|| format!("{}{event}", self.namespace))
    }
}
