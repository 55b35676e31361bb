// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_proximity --heading-base-level=0

//! Vantage Proximity: keep exactly one page element "in focus" while the user scrolls.
//!
//! ## Overview
//!
//! Media pages autoplay the clip nearest the middle of the screen and pause the rest.
//! This crate owns that decision. Register elements as [`Candidate`]s with an activate
//! and a deactivate callback; on every page event the [`Scheduler`] measures each
//! element and makes sure at most one of them is active.
//!
//! ## Measuring
//!
//! The scheduler does not know about browsers. It measures through the [`Document`]
//! trait (viewport height, viewport-relative bounding boxes, element checks) and
//! subscribes through the [`EventTarget`] trait. [`page::Page`] implements both in
//! memory; the `event_bus_adapter` feature lets a `vantage_events::EventBus<Trigger>`
//! stand in for the window.
//!
//! ## Selection
//!
//! - The proximity distance of an element is how far its nearest horizontal edge is
//!   from the viewport's vertical center ([`proximity_distance`]).
//! - An element whose bottom edge is within [`SchedulerConfig::exit_margin`] of the
//!   viewport top, or whose top edge is within that margin of the viewport bottom, has
//!   scrolled out. If it was active it is deactivated.
//! - A challenger only unseats the active element when it is strictly closer. Ties keep
//!   the incumbent, so two equally placed clips never flap.
//! - Candidates marked scroll-only are re-evaluated on [`Trigger::Scroll`] alone.
//!
//! ## Workflow
//!
//! 1) Wrap a document handle in a [`Scheduler`].
//! 2) [`Scheduler::add`] one [`Candidate`] per player.
//! 3) Either call [`Scheduler::recheck_all`] / [`Scheduler::handle_event`] from your own
//!    event loop, or share the scheduler as `Rc<RefCell<_>>` and let
//!    [`Scheduler::listen`] subscribe it to an [`EventTarget`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use vantage_proximity::page::Page;
//! use vantage_proximity::{Candidate, Scheduler, Trigger};
//!
//! let page = Rc::new(Page::new(800.0));
//! let near = page.insert("near", Rect::new(0.0, 350.0, 640.0, 450.0));
//! let far = page.insert("far", Rect::new(0.0, 100.0, 640.0, 200.0));
//!
//! let playing = Rc::new(RefCell::new(Vec::new()));
//! let mut scheduler = Scheduler::new(Rc::clone(&page));
//! for (key, element) in [("near", near), ("far", far)] {
//!     let (on, off) = (Rc::clone(&playing), Rc::clone(&playing));
//!     scheduler.add(
//!         key,
//!         Candidate::new(
//!             element,
//!             move || on.borrow_mut().push(key),
//!             move || off.borrow_mut().retain(|k| *k != key),
//!         ),
//!     );
//! }
//!
//! scheduler.recheck_all(Some(Trigger::Scroll));
//! assert_eq!(scheduler.active_key(), Some("near"));
//! assert!(playing.borrow().iter().all(|k| *k == "near"));
//! ```
//!
//! Callbacks run synchronously inside a pass; the scheduler is single-threaded.

pub mod adapters;
mod candidate;
pub mod page;
pub mod scheduler;
pub mod types;

pub use candidate::Candidate;
pub use scheduler::{Scheduler, is_out_of_view, proximity_distance};
pub use types::{
    AddError, DEFAULT_EXIT_MARGIN, Document, ElementRef, EventTarget, SchedulerConfig, Trigger,
    TriggerSet, is_element,
};
