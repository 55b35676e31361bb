// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidates: an element plus the callbacks that switch it on and off.

/// An element registered with the scheduler.
///
/// The scheduler calls `activate` when the element becomes the one nearest the
/// viewport center and `deactivate` when it loses that position. It never calls
/// both at once, and never from more than one place at a time.
///
/// ```
/// use vantage_proximity::Candidate;
///
/// let player = Candidate::new(7_u32, || println!("play"), || println!("pause"))
///     .with_scroll_only(true);
/// assert!(player.is_scroll_only());
/// assert_eq!(*player.element(), 7);
/// ```
pub struct Candidate<N> {
    pub(crate) element: N,
    on_activate: Box<dyn FnMut()>,
    on_deactivate: Box<dyn FnMut()>,
    pub(crate) scroll_only: bool,
}

impl<N: core::fmt::Debug> core::fmt::Debug for Candidate<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Candidate")
            .field("element", &self.element)
            .field("scroll_only", &self.scroll_only)
            .finish_non_exhaustive()
    }
}

impl<N> Candidate<N> {
    /// Create a candidate that reacts to every trigger.
    pub fn new(
        element: N,
        activate: impl FnMut() + 'static,
        deactivate: impl FnMut() + 'static,
    ) -> Self {
        Self {
            element,
            on_activate: Box::new(activate),
            on_deactivate: Box::new(deactivate),
            scroll_only: false,
        }
    }

    /// Restrict (or stop restricting) re-evaluation of this candidate to scroll triggers.
    pub fn with_scroll_only(mut self, scroll_only: bool) -> Self {
        self.scroll_only = scroll_only;
        self
    }

    /// The element this candidate measures.
    pub fn element(&self) -> &N {
        &self.element
    }

    /// True if only scroll triggers re-evaluate this candidate.
    pub fn is_scroll_only(&self) -> bool {
        self.scroll_only
    }

    pub(crate) fn activate(&mut self) {
        (self.on_activate)();
    }

    pub(crate) fn deactivate(&mut self) {
        (self.on_deactivate)();
    }
}
