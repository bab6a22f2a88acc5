// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared tooltip state that render subscribers consume.

use canopy_placement::{Direction, Side, StickToEdge};
use kurbo::{Point, Size};

use crate::content::Content;
use crate::options::ShowMode;

/// The single live tooltip's state.
///
/// `K` is the host's copyable target key (a non-owning back-reference used
/// only to recompute geometry — it never extends any host object's
/// lifetime); `N` is the opaque content node handle.
///
/// One controller owns exactly one of these; there are never concurrent
/// tooltips. `visible == false && transitioning == false` is the only fully
/// hidden combination — render subscribers must not paint in that state, and
/// must keep painting (for fade-out) while `transitioning` is still set.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState<K, N> {
    /// Whether the tooltip is logically shown.
    pub visible: bool,
    /// Whether a fade (show-to-show cross-fade or hide fade-out) is running.
    pub transitioning: bool,
    /// Viewport coordinates of the tooltip's top-left corner.
    pub position: Point,
    /// Resolved content, if any.
    pub content: Option<Content<N>>,
    /// The target currently owning the tooltip.
    pub target: Option<K>,
    /// The placement side that was chosen.
    pub side: Side,
    /// Arrow anchor, relative to the tooltip's top-left.
    pub arrow: Point,
    /// Whether the arrow should be drawn.
    pub arrow_visible: bool,
    /// Arrow rotation in radians, when an arrow is drawn.
    pub arrow_rotation: Option<f64>,
    /// Resolved writing direction the geometry was computed for.
    pub direction: Direction,
    /// The tooltip dimensions the geometry was computed with.
    pub size: Size,
    /// Suppress the position transition for the current update.
    pub disable_transition: bool,
    /// Whether the rendered tooltip receives pointer events.
    pub allow_pointer_events: bool,
    /// How the current tooltip was initiated.
    pub show_mode: ShowMode,
    /// The point-mode edge override in effect.
    pub stick_to_edge: StickToEdge,
    /// Tooltip rotation in radians.
    pub rotation: f64,
}

impl<K, N> Default for TooltipState<K, N> {
    fn default() -> Self {
        Self {
            visible: false,
            transitioning: false,
            position: Point::ZERO,
            content: None,
            target: None,
            side: Side::Top,
            arrow: Point::ZERO,
            arrow_visible: false,
            arrow_rotation: None,
            direction: Direction::Ltr,
            size: Size::ZERO,
            disable_transition: false,
            allow_pointer_events: false,
            show_mode: ShowMode::Hover,
            stick_to_edge: StickToEdge::None,
            rotation: 0.0,
        }
    }
}

impl<K, N> TooltipState<K, N> {
    /// Returns `true` in the terminal fully-hidden state (not visible and
    /// not fading out).
    #[must_use]
    pub fn is_fully_hidden(&self) -> bool {
        !self.visible && !self.transitioning
    }
}
