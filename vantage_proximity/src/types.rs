// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the scheduler: triggers, documents, configuration, and errors.
//!
//! ## Overview
//!
//! These types describe what the [`Scheduler`](crate::scheduler::Scheduler) listens to
//! ([`Trigger`], [`TriggerSet`], [`EventTarget`]), what it measures against
//! ([`Document`]), and how it is tuned ([`SchedulerConfig`]).

use std::rc::Rc;

use kurbo::Rect;

/// Margin, in pixels, used by the exit guard when no configuration is given.
pub const DEFAULT_EXIT_MARGIN: f64 = 40.0;

/// Page events that cause the scheduler to re-evaluate its candidates.
///
/// Only [`Trigger::Scroll`] counts as a scroll event; every other trigger is generic.
/// See [`Candidate::with_scroll_only`](crate::candidate::Candidate::with_scroll_only).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Trigger {
    /// `scroll`
    Scroll,
    /// `touchstart`
    TouchStart,
    /// `click`
    Click,
    /// `change`
    Change,
    /// `select`
    Select,
    /// `wheel`
    Wheel,
    /// `resize`
    Resize,
    /// `keydown`
    KeyDown,
    /// `keypress`
    KeyPress,
    /// `keyup`
    KeyUp,
    /// `mousedown`
    MouseDown,
    /// `mouseenter`
    MouseEnter,
    /// `mouseleave`
    MouseLeave,
    /// `mousemove`
    MouseMove,
    /// `mouseover`
    MouseOver,
    /// `mouseout`
    MouseOut,
    /// `mouseup`
    MouseUp,
    /// `search`
    Search,
    /// `touchcancel`
    TouchCancel,
    /// `touchend`
    TouchEnd,
    /// `touchmove`
    TouchMove,
}

impl Trigger {
    /// Every trigger, in subscription order.
    pub const ALL: [Self; 21] = [
        Self::Scroll,
        Self::TouchStart,
        Self::Click,
        Self::Change,
        Self::Select,
        Self::Wheel,
        Self::Resize,
        Self::KeyDown,
        Self::KeyPress,
        Self::KeyUp,
        Self::MouseDown,
        Self::MouseEnter,
        Self::MouseLeave,
        Self::MouseMove,
        Self::MouseOver,
        Self::MouseOut,
        Self::MouseUp,
        Self::Search,
        Self::TouchCancel,
        Self::TouchEnd,
        Self::TouchMove,
    ];

    /// The DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
            Self::Click => "click",
            Self::Change => "change",
            Self::Select => "select",
            Self::Wheel => "wheel",
            Self::Resize => "resize",
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::KeyUp => "keyup",
            Self::MouseDown => "mousedown",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::MouseMove => "mousemove",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::MouseUp => "mouseup",
            Self::Search => "search",
            Self::TouchCancel => "touchcancel",
            Self::TouchEnd => "touchend",
            Self::TouchMove => "touchmove",
        }
    }

    /// Look up a trigger by DOM event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The single-trigger [`TriggerSet`].
    pub const fn flag(self) -> TriggerSet {
        TriggerSet::from_bits_retain(1 << self as u32)
    }

    /// True only for [`Trigger::Scroll`].
    pub const fn is_scroll(self) -> bool {
        matches!(self, Self::Scroll)
    }
}

bitflags::bitflags! {
    /// A set of [`Trigger`]s, used to choose which page events the scheduler subscribes to.
    ///
    /// Bit positions follow [`Trigger::ALL`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TriggerSet: u32 {
        /// `scroll`
        const SCROLL = 1 << 0;
        /// `touchstart`
        const TOUCH_START = 1 << 1;
        /// `click`
        const CLICK = 1 << 2;
        /// `change`
        const CHANGE = 1 << 3;
        /// `select`
        const SELECT = 1 << 4;
        /// `wheel`
        const WHEEL = 1 << 5;
        /// `resize`
        const RESIZE = 1 << 6;
        /// `keydown`
        const KEY_DOWN = 1 << 7;
        /// `keypress`
        const KEY_PRESS = 1 << 8;
        /// `keyup`
        const KEY_UP = 1 << 9;
        /// `mousedown`
        const MOUSE_DOWN = 1 << 10;
        /// `mouseenter`
        const MOUSE_ENTER = 1 << 11;
        /// `mouseleave`
        const MOUSE_LEAVE = 1 << 12;
        /// `mousemove`
        const MOUSE_MOVE = 1 << 13;
        /// `mouseover`
        const MOUSE_OVER = 1 << 14;
        /// `mouseout`
        const MOUSE_OUT = 1 << 15;
        /// `mouseup`
        const MOUSE_UP = 1 << 16;
        /// `search`
        const SEARCH = 1 << 17;
        /// `touchcancel`
        const TOUCH_CANCEL = 1 << 18;
        /// `touchend`
        const TOUCH_END = 1 << 19;
        /// `touchmove`
        const TOUCH_MOVE = 1 << 20;

        /// All keyboard triggers.
        const KEYBOARD = Self::KEY_DOWN.bits() | Self::KEY_PRESS.bits() | Self::KEY_UP.bits();
        /// All mouse triggers, including `click` and `wheel`.
        const POINTER = Self::CLICK.bits()
            | Self::WHEEL.bits()
            | Self::MOUSE_DOWN.bits()
            | Self::MOUSE_ENTER.bits()
            | Self::MOUSE_LEAVE.bits()
            | Self::MOUSE_MOVE.bits()
            | Self::MOUSE_OVER.bits()
            | Self::MOUSE_OUT.bits()
            | Self::MOUSE_UP.bits();
        /// All touch triggers.
        const TOUCH = Self::TOUCH_START.bits()
            | Self::TOUCH_CANCEL.bits()
            | Self::TOUCH_END.bits()
            | Self::TOUCH_MOVE.bits();
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self::all()
    }
}

impl TriggerSet {
    /// The triggers in this set, in [`Trigger::ALL`] order.
    pub fn triggers(self) -> impl Iterator<Item = Trigger> {
        Trigger::ALL
            .into_iter()
            .filter(move |t| self.contains(t.flag()))
    }
}

/// Geometry and element source the scheduler measures against.
///
/// `N` is the host's element handle. Handles are compared with `PartialEq` to decide
/// whether two candidates refer to the same element.
///
/// Rectangles are viewport-relative: `y0` is the top edge, `y1` the bottom edge.
/// Float inputs are assumed to be finite (no NaNs).
pub trait Document<N> {
    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Bounding box of `node` relative to the viewport.
    ///
    /// Detached nodes should report [`Rect::ZERO`].
    fn bounding_rect(&self, node: &N) -> Rect;

    /// True if `node` is a genuine renderable element of this document.
    fn is_element(&self, node: &N) -> bool;

    /// Resolve an element id attribute to a node.
    fn lookup_id(&self, id: &str) -> Option<N>;
}

impl<N, D: Document<N> + ?Sized> Document<N> for &D {
    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }

    fn bounding_rect(&self, node: &N) -> Rect {
        (**self).bounding_rect(node)
    }

    fn is_element(&self, node: &N) -> bool {
        (**self).is_element(node)
    }

    fn lookup_id(&self, id: &str) -> Option<N> {
        (**self).lookup_id(id)
    }
}

impl<N, D: Document<N> + ?Sized> Document<N> for Rc<D> {
    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }

    fn bounding_rect(&self, node: &N) -> Rect {
        (**self).bounding_rect(node)
    }

    fn is_element(&self, node: &N) -> bool {
        (**self).is_element(node)
    }

    fn lookup_id(&self, id: &str) -> Option<N> {
        (**self).lookup_id(id)
    }
}

/// A value to test with [`is_element`]: a node handle, or an id to resolve first.
#[derive(Copy, Clone, Debug)]
pub enum ElementRef<'a, N> {
    /// A node handle.
    Node(&'a N),
    /// An element id attribute.
    Id(&'a str),
}

/// True if `target` resolves to a genuine element of `doc`.
///
/// An empty id never resolves.
pub fn is_element<N, D: Document<N> + ?Sized>(doc: &D, target: ElementRef<'_, N>) -> bool {
    match target {
        ElementRef::Node(node) => doc.is_element(node),
        ElementRef::Id(id) => {
            !id.is_empty() && doc.lookup_id(id).is_some_and(|node| doc.is_element(&node))
        }
    }
}

/// Something the scheduler can subscribe to, such as the page window.
///
/// See [`Scheduler::listen`](crate::scheduler::Scheduler::listen).
pub trait EventTarget {
    /// Call `listener` every time `trigger` fires.
    fn add_listener(&self, trigger: Trigger, listener: Box<dyn FnMut(Trigger)>);
}

/// Tuning for a [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Distance, in pixels, an element must keep inside the viewport to stay eligible.
    ///
    /// An element whose bottom is above `exit_margin`, or whose top is within
    /// `exit_margin` of the viewport's bottom edge, is treated as scrolled out.
    pub exit_margin: f64,
    /// Triggers subscribed to by [`Scheduler::listen`](crate::scheduler::Scheduler::listen)
    /// and honored by [`Scheduler::handle_event`](crate::scheduler::Scheduler::handle_event).
    pub triggers: TriggerSet,
    /// Whether an element edge exactly on the viewport center may activate.
    ///
    /// Off by default: a proximity distance of exactly zero is treated as ineligible.
    pub accept_zero_distance: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            exit_margin: DEFAULT_EXIT_MARGIN,
            triggers: TriggerSet::all(),
            accept_zero_distance: false,
        }
    }
}

/// Why [`Scheduler::try_add`](crate::scheduler::Scheduler::try_add) rejected a candidate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddError {
    /// The key is empty (or a placeholder such as `"undefined"`).
    #[error("candidate key is empty")]
    EmptyKey,
    /// The candidate's element is not an element of the scheduler's document.
    #[error("candidate `{key}` does not reference an element of the document")]
    NotAnElement {
        /// The rejected key.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_names_round_trip() {
        for t in Trigger::ALL {
            assert_eq!(Trigger::from_name(t.name()), Some(t));
        }
        assert_eq!(Trigger::from_name("pointerdown"), None);
        assert_eq!(Trigger::from_name(""), None);
    }

    #[test]
    fn trigger_flags_match_named_constants() {
        assert_eq!(Trigger::Scroll.flag(), TriggerSet::SCROLL);
        assert_eq!(Trigger::KeyPress.flag(), TriggerSet::KEY_PRESS);
        assert_eq!(Trigger::MouseOut.flag(), TriggerSet::MOUSE_OUT);
        assert_eq!(Trigger::TouchMove.flag(), TriggerSet::TOUCH_MOVE);
        let all = Trigger::ALL
            .into_iter()
            .fold(TriggerSet::empty(), |acc, t| acc | t.flag());
        assert_eq!(all, TriggerSet::all());
    }

    #[test]
    fn only_scroll_is_scroll() {
        assert!(Trigger::Scroll.is_scroll());
        assert_eq!(Trigger::ALL.iter().filter(|t| t.is_scroll()).count(), 1);
    }

    #[test]
    fn trigger_set_iterates_in_order() {
        let set = TriggerSet::KEYBOARD | TriggerSet::SCROLL;
        let got: Vec<_> = set.triggers().collect();
        assert_eq!(
            got,
            [
                Trigger::Scroll,
                Trigger::KeyDown,
                Trigger::KeyPress,
                Trigger::KeyUp
            ]
        );
        assert_eq!(TriggerSet::default().triggers().count(), 21);
        assert_eq!(TriggerSet::TOUCH.triggers().count(), 4);
        assert_eq!(TriggerSet::POINTER.triggers().count(), 9);
    }

    #[test]
    fn default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.exit_margin, 40.0);
        assert_eq!(config.triggers, TriggerSet::all());
        assert!(!config.accept_zero_distance);
    }
}
