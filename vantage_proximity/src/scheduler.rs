// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scheduler implementation.
//!
//! ## Overview
//!
//! Holds the candidate registry and the single active record, and re-evaluates both
//! against the [`Document`] whenever a [`Trigger`] fires.
//!
//! ## Re-evaluation pass
//!
//! - Empty registry: nothing happens.
//! - No incumbent: the first-inserted candidate is checked first (priming).
//! - Incumbent present: the incumbent itself is checked first, so it can keep its place
//!   or yield before challengers are considered. This is the candidate that was
//!   activated, even if its key has since been re-registered with another element.
//!   An incumbent whose key was removed is not measured.
//! - Then every candidate is checked in insertion order. The incumbent is checked twice
//!   per pass; the second check is idempotent.
//!
//! ## Per-candidate check
//!
//! - Skipped when the trigger is not a scroll and the candidate is scroll-only.
//! - Exit guard: an element whose bottom is above the margin, or whose top is within the
//!   margin of the viewport bottom, is out. If it was active it is deactivated and the
//!   scheduler goes back to having no active candidate.
//! - Proximity distance: the smaller of the top and bottom edges' distances to the
//!   viewport's vertical center.
//! - A challenger must be strictly closer than the incumbent's recorded distance.
//!   The incumbent itself (or anyone, when nothing is active) uses its fresh distance.
//! - A winning challenger deactivates the incumbent, then activates and becomes the
//!   incumbent. A re-checked incumbent is activated again with its new distance.
//!
//! ## See Also
//!
//! [`page`](crate::page) for an in-memory [`Document`] that also acts as an
//! [`EventTarget`].

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use kurbo::Rect;
use vantage_store::inspect;

use crate::candidate::Candidate;
use crate::types::{AddError, Document, EventTarget, SchedulerConfig, Trigger};

type Shared<N> = Rc<RefCell<Candidate<N>>>;

// The incumbent keeps its own handle to the candidate, so it can still be deactivated
// after its registry entry has been removed or overwritten.
struct Active<N> {
    distance: f64,
    key: String,
    element: N,
    candidate: Shared<N>,
}

/// Proximity of an element to the viewport's vertical center.
///
/// The smaller of the distances from the rectangle's top (`y0`) and bottom (`y1`)
/// edges to `viewport_height / 2`.
pub fn proximity_distance(rect: Rect, viewport_height: f64) -> f64 {
    let mid = viewport_height / 2.0;
    (rect.y0 - mid).abs().min((rect.y1 - mid).abs())
}

/// True if an element with this viewport-relative `rect` has scrolled out of view.
pub fn is_out_of_view(rect: Rect, viewport_height: f64, margin: f64) -> bool {
    rect.y1 < margin || viewport_height - rect.y0 < margin
}

/// Keeps at most one registered candidate active: the one nearest the viewport center.
///
/// ## Usage
///
/// - Construct with [`Scheduler::new`] or [`Scheduler::with_config`] around a
///   [`Document`]. Construction runs one (empty) pass, like a page script evaluated at
///   load time.
/// - Register elements with [`Scheduler::add`] and drop them with
///   [`Scheduler::remove`].
/// - Drive it by calling [`Scheduler::recheck_all`] or [`Scheduler::handle_event`]
///   from your event loop, or wrap it in `Rc<RefCell<_>>` and let
///   [`Scheduler::listen`] subscribe it to an [`EventTarget`].
///
/// ## Callbacks
///
/// Activation callbacks run synchronously inside a pass. They cannot reach the
/// scheduler through `&mut self`; when the scheduler is shared through
/// [`Scheduler::listen`], triggers fired from inside a callback are dropped with a
/// warning instead of re-entering the pass.
pub struct Scheduler<N, D> {
    document: D,
    config: SchedulerConfig,
    registry: IndexMap<String, Shared<N>>,
    active: Option<Active<N>>,
}

impl<N, D> core::fmt::Debug for Scheduler<N, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("candidates", &self.registry.len())
            .field("active_key", &self.active.as_ref().map(|a| a.key.as_str()))
            .field(
                "active_distance",
                &self.active.as_ref().map_or(f64::INFINITY, |a| a.distance),
            )
            .finish_non_exhaustive()
    }
}

impl<N: Clone + PartialEq, D: Document<N>> Scheduler<N, D> {
    /// Create a scheduler with the default [`SchedulerConfig`].
    pub fn new(document: D) -> Self {
        Self::with_config(document, SchedulerConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(document: D, config: SchedulerConfig) -> Self {
        let mut scheduler = Self {
            document,
            config,
            registry: IndexMap::new(),
            active: None,
        };
        scheduler.recheck_all(None);
        scheduler
    }

    /// Register `candidate` under `key`. Returns false, with no side effect, if it is
    /// rejected. See [`Scheduler::try_add`].
    pub fn add(&mut self, key: &str, candidate: Candidate<N>) -> bool {
        match self.try_add(key, candidate) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(
                    target: "vantage.proximity",
                    key,
                    error = %err,
                    "candidate rejected"
                );
                false
            }
        }
    }

    /// Register `candidate` under `key`.
    ///
    /// The key must be non-empty (placeholder strings such as `"undefined"` count as
    /// empty) and the element must be an element of the document.
    /// Registering an existing key replaces its candidate in place, keeping its position
    /// in the evaluation order. Nothing is activated until the next pass.
    pub fn try_add(&mut self, key: &str, candidate: Candidate<N>) -> Result<(), AddError> {
        if inspect::is_empty_str(key) {
            return Err(AddError::EmptyKey);
        }
        if !self.document.is_element(&candidate.element) {
            return Err(AddError::NotAnElement {
                key: key.to_owned(),
            });
        }
        let scroll_only = candidate.scroll_only;
        let replaced = self
            .registry
            .insert(key.to_owned(), Rc::new(RefCell::new(candidate)))
            .is_some();
        tracing::debug!(
            target: "vantage.proximity",
            key,
            scroll_only,
            replaced,
            "candidate registered"
        );
        Ok(())
    }

    /// Drop the candidate registered under `key`. Returns false if there was none.
    ///
    /// The candidate is not deactivated. If it was active it stays the incumbent until a
    /// challenger unseats it (which deactivates it) or the scheduler is dropped.
    pub fn remove(&mut self, key: &str) -> bool {
        if inspect::is_empty_str(key) {
            return false;
        }
        let removed = self.registry.shift_remove(key).is_some();
        if removed {
            tracing::debug!(target: "vantage.proximity", key, "candidate removed");
        }
        removed
    }

    /// Re-evaluate the candidate under `key` on scroll triggers only.
    ///
    /// Returns false if there is no such candidate.
    pub fn set_only_scroll_trigger(&mut self, key: &str) -> bool {
        self.set_scroll_only(key, true)
    }

    /// Re-evaluate the candidate under `key` on every trigger.
    ///
    /// Returns false if there is no such candidate.
    pub fn set_all_events_trigger(&mut self, key: &str) -> bool {
        self.set_scroll_only(key, false)
    }

    fn set_scroll_only(&mut self, key: &str, scroll_only: bool) -> bool {
        if inspect::is_empty_str(key) {
            return false;
        }
        match self.registry.get(key) {
            Some(candidate) => {
                candidate.borrow_mut().scroll_only = scroll_only;
                true
            }
            None => false,
        }
    }

    /// Map a DOM event name to a [`Trigger`] and run a pass for it.
    ///
    /// Returns false, without a pass, for unknown names and for triggers outside
    /// [`SchedulerConfig::triggers`].
    pub fn handle_event(&mut self, name: &str) -> bool {
        match Trigger::from_name(name) {
            Some(trigger) if self.config.triggers.contains(trigger.flag()) => {
                self.recheck_all(Some(trigger));
                true
            }
            _ => false,
        }
    }

    /// Run one re-evaluation pass. `None` is treated as a non-scroll trigger.
    pub fn recheck_all(&mut self, trigger: Option<Trigger>) {
        if self.registry.is_empty() {
            return;
        }
        let is_scroll = trigger.is_some_and(Trigger::is_scroll);

        let first = match &self.active {
            Some(active) => self
                .registry
                .contains_key(&active.key)
                .then(|| (active.key.clone(), Rc::clone(&active.candidate))),
            None => self
                .registry
                .first()
                .map(|(key, candidate)| (key.clone(), Rc::clone(candidate))),
        };
        if let Some((key, candidate)) = first {
            self.check_proximity(&key, candidate, is_scroll);
        }

        // Snapshot: the registry must not shift under the sweep.
        let entries: Vec<(String, Shared<N>)> = self
            .registry
            .iter()
            .map(|(key, candidate)| (key.clone(), Rc::clone(candidate)))
            .collect();
        for (key, candidate) in entries {
            self.check_proximity(&key, candidate, is_scroll);
        }
    }

    fn check_proximity(&mut self, key: &str, candidate: Shared<N>, is_scroll: bool) {
        let (element, scroll_only) = {
            let c = candidate.borrow();
            (c.element.clone(), c.scroll_only)
        };
        if scroll_only && !is_scroll {
            return;
        }

        let rect = self.document.bounding_rect(&element);
        let viewport_height = self.document.viewport_height();
        let is_different = self
            .active
            .as_ref()
            .is_none_or(|active| active.element != element);

        if is_out_of_view(rect, viewport_height, self.config.exit_margin) {
            if !is_different && let Some(previous) = self.active.take() {
                tracing::debug!(
                    target: "vantage.proximity",
                    key = %previous.key,
                    "active candidate scrolled out of view"
                );
                previous.candidate.borrow_mut().deactivate();
            }
            return;
        }

        let current = proximity_distance(rect, viewport_height);
        let active_distance = self.active_distance();
        let eligible = if is_different {
            // A challenger must be strictly closer than the incumbent.
            (active_distance > current).then_some(current)
        } else {
            Some(current)
        };
        let accept_zero = self.config.accept_zero_distance;
        let Some(distance) = eligible.filter(|d| !d.is_nan() && (accept_zero || *d != 0.0)) else {
            return;
        };

        if is_different
            && distance != active_distance
            && let Some(previous) = self.active.take()
        {
            tracing::debug!(
                target: "vantage.proximity",
                key = %previous.key,
                distance = previous.distance,
                challenger = key,
                "incumbent unseated"
            );
            previous.candidate.borrow_mut().deactivate();
        }

        tracing::trace!(target: "vantage.proximity", key, distance, "activating");
        candidate.borrow_mut().activate();
        self.active = Some(Active {
            distance,
            key: key.to_owned(),
            element,
            candidate,
        });
    }

    /// Wire `this` to every trigger in its [`SchedulerConfig::triggers`] on `target`.
    ///
    /// Listeners hold a weak reference: once the scheduler is dropped they do nothing.
    /// Returns the number of listeners installed.
    pub fn listen(this: &Rc<RefCell<Self>>, target: &impl EventTarget) -> usize
    where
        N: 'static,
        D: 'static,
    {
        let triggers = this.borrow().config.triggers;
        let mut installed = 0;
        for trigger in triggers.triggers() {
            let weak = Rc::downgrade(this);
            target.add_listener(
                trigger,
                Box::new(move |fired| {
                    let Some(strong) = weak.upgrade() else {
                        return;
                    };
                    let Ok(mut scheduler) = strong.try_borrow_mut() else {
                        tracing::warn!(
                            target: "vantage.proximity",
                            trigger = fired.name(),
                            "trigger fired during a pass; ignoring"
                        );
                        return;
                    };
                    scheduler.recheck_all(Some(fired));
                }),
            );
            installed += 1;
        }
        installed
    }
}

impl<N, D> Scheduler<N, D> {
    /// Number of registered candidates.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True if no candidate is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// True if a candidate is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    /// Registered keys, in evaluation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    /// Whether the candidate under `key` is scroll-only, or `None` if not registered.
    pub fn is_scroll_only(&self, key: &str) -> Option<bool> {
        self.registry.get(key).map(|c| c.borrow().scroll_only)
    }

    /// Key of the active candidate, if any.
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.key.as_str())
    }

    /// Recorded proximity distance of the active candidate, or `+∞` when none is active.
    pub fn active_distance(&self) -> f64 {
        self.active.as_ref().map_or(f64::INFINITY, |a| a.distance)
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The document being measured.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, for hosts that own it by value.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }
}
