// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory page: a scrollable column of elements that also acts as the window.
//!
//! ## Overview
//!
//! [`Page`] stores element bounds in page coordinates and reports them relative to the
//! viewport, offset by the current scroll position. It implements [`Document`] for
//! measurements and [`EventTarget`] for subscriptions, so a [`Scheduler`] can be run
//! against it without a browser.
//!
//! Every method takes `&self`: share the page with `Rc` and hand one clone to the
//! scheduler while keeping another to drive scrolling.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use vantage_proximity::page::{Page, PageScheduler};
//! use vantage_proximity::{Candidate, Scheduler};
//!
//! let page = Rc::new(Page::new(800.0));
//! let clip = page.insert("clip", Rect::new(0.0, 1200.0, 640.0, 1560.0));
//!
//! let scheduler = Rc::new(RefCell::new(PageScheduler::new(Rc::clone(&page))));
//! assert_eq!(Scheduler::listen(&scheduler, &*page), 21);
//! scheduler.borrow_mut().add("clip", Candidate::new(clip, || {}, || {}));
//!
//! page.scroll_to(1000.0);
//! assert_eq!(scheduler.borrow().active_key(), Some("clip"));
//! ```
//!
//! [`Scheduler`]: crate::scheduler::Scheduler

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Rect, Vec2};

use crate::scheduler::Scheduler;
use crate::types::{Document, EventTarget, Trigger};

/// Handle to an element of a [`Page`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Index of the element in insertion order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A scheduler measuring a shared [`Page`].
pub type PageScheduler = Scheduler<ElementId, Rc<Page>>;

#[derive(Debug)]
struct Element {
    id: String,
    bounds: Rect,
    attached: bool,
}

type Listener = Box<dyn FnMut(Trigger)>;

/// In-memory [`Document`] and [`EventTarget`].
pub struct Page {
    viewport_height: Cell<f64>,
    scroll_y: Cell<f64>,
    elements: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<(Trigger, Listener)>>,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("viewport_height", &self.viewport_height.get())
            .field("scroll_y", &self.scroll_y.get())
            .field("elements", &self.elements.borrow().len())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Create an empty page scrolled to the top.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: Cell::new(viewport_height),
            scroll_y: Cell::new(0.0),
            elements: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Add an element with an id attribute and bounds in page coordinates.
    ///
    /// Ids need not be unique; [`Document::lookup_id`] resolves to the first attached
    /// element with a matching id.
    pub fn insert(&self, id: &str, bounds: Rect) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        let handle = ElementId(u32::try_from(elements.len()).unwrap_or(u32::MAX));
        elements.push(Element {
            id: id.to_owned(),
            bounds,
            attached: true,
        });
        handle
    }

    /// Move or resize an element. Returns false for a foreign handle.
    ///
    /// Layout changes fire nothing on their own.
    pub fn set_bounds(&self, element: ElementId, bounds: Rect) -> bool {
        self.with_element(element, |e| e.bounds = bounds)
    }

    /// Remove an element from layout. It keeps its handle and still counts as an
    /// element, but measures as [`Rect::ZERO`] and is no longer found by id.
    pub fn detach(&self, element: ElementId) -> bool {
        self.with_element(element, |e| e.attached = false)
    }

    /// Put a detached element back into layout.
    pub fn attach(&self, element: ElementId) -> bool {
        self.with_element(element, |e| e.attached = true)
    }

    fn with_element(&self, element: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.borrow_mut().get_mut(element.index()) {
            Some(e) => {
                f(e);
                true
            }
            None => false,
        }
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    /// Scroll to `y` and fire [`Trigger::Scroll`]. Returns the number of listeners run.
    pub fn scroll_to(&self, y: f64) -> usize {
        self.scroll_y.set(y);
        self.fire(Trigger::Scroll)
    }

    /// Scroll by `dy` and fire [`Trigger::Scroll`]. Returns the number of listeners run.
    pub fn scroll_by(&self, dy: f64) -> usize {
        self.scroll_to(self.scroll_y.get() + dy)
    }

    /// Change the viewport height and fire [`Trigger::Resize`].
    pub fn resize(&self, viewport_height: f64) -> usize {
        self.viewport_height.set(viewport_height);
        self.fire(Trigger::Resize)
    }

    /// Run every listener subscribed to `trigger`, in subscription order.
    ///
    /// Listeners added while firing are kept but only run from the next call.
    /// Listeners of the outer call are not visible to a nested `fire`.
    pub fn fire(&self, trigger: Trigger) -> usize {
        let mut running = core::mem::take(&mut *self.listeners.borrow_mut());
        let mut ran = 0;
        for (subscribed, listener) in &mut running {
            if *subscribed == trigger {
                listener(trigger);
                ran += 1;
            }
        }
        let mut listeners = self.listeners.borrow_mut();
        let added = core::mem::replace(&mut *listeners, running);
        listeners.extend(added);
        ran
    }

    /// Number of listeners subscribed to `trigger`.
    pub fn listener_count(&self, trigger: Trigger) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(t, _)| *t == trigger)
            .count()
    }
}

impl Document<ElementId> for Page {
    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn bounding_rect(&self, node: &ElementId) -> Rect {
        match self.elements.borrow().get(node.index()) {
            Some(e) if e.attached => e.bounds - Vec2::new(0.0, self.scroll_y.get()),
            _ => Rect::ZERO,
        }
    }

    fn is_element(&self, node: &ElementId) -> bool {
        node.index() < self.elements.borrow().len()
    }

    fn lookup_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .borrow()
            .iter()
            .position(|e| e.attached && e.id == id)
            .and_then(|i| u32::try_from(i).ok())
            .map(ElementId)
    }
}

impl EventTarget for Page {
    fn add_listener(&self, trigger: Trigger, listener: Box<dyn FnMut(Trigger)>) {
        self.listeners.borrow_mut().push((trigger, listener));
    }
}
