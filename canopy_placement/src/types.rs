// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the placement engine: sides, preferences, anchors,
//! tunable constants, and the computed placement itself.

use kurbo::{Point, Rect, Size};

use crate::bounds::Direction;

/// The side of the anchor on which the overlay is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Side {
    /// Above the anchor.
    #[default]
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

/// Caller preference for which side to place the overlay on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Preference {
    /// Choose automatically: top, then bottom, then the direction-aware
    /// horizontal side (right in LTR, left in RTL), then the other one.
    #[default]
    Auto,
    /// Use this side when it fits; fall back through top → bottom → right →
    /// left otherwise, and force this side if nothing fits.
    Fixed(Side),
}

/// Point-mode position override: pin one axis to a viewport edge, or replace
/// the computed position outright.
///
/// Only consulted for [`Anchor::Pointer`] placements; element-based
/// placements ignore it.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum StickToEdge {
    /// No override.
    #[default]
    None,
    /// Pin the axis perpendicular to this edge: `Left`/`Top` pin to the
    /// window origin, `Right`/`Bottom` to the far edge.
    Edge(Side),
    /// Replace the computed position with this point.
    At(Point),
}

/// What the overlay is anchored to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// A target rectangle (an element's bounding box, in viewport
    /// coordinates). Placement searches the four sides around it.
    Target(Rect),
    /// A bare pointer coordinate. The overlay trails the pointer with a small
    /// lateral offset and draws no arrow.
    Pointer(Point),
}

/// Empirically tuned placement constants.
///
/// These are configuration, not correctness requirements: the defaults come
/// from hand-tuning against real screens, and hosts may override any of them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tunables {
    /// Margin kept between the overlay and every window edge.
    pub viewport_margin: f64,
    /// Minimum distance kept between the arrow anchor and the overlay's
    /// corners.
    pub arrow_corner_margin: f64,
    /// Hide the arrow when the overlay center ends up farther than this from
    /// the target center (clamping can push the overlay far from its ideal
    /// spot; an arrow pointing at empty space is worse than none).
    pub arrow_max_distance: f64,
    /// Suppress the position transition when the overlay moved farther than
    /// this since the last render; a slide across the whole screen is more
    /// distracting than a jump.
    pub slide_suppress_distance: f64,
    /// Lateral gap between the pointer and the overlay in point-based mode,
    /// so the cursor does not occlude it.
    pub pointer_gap: f64,
    /// Dimensions assumed when the overlay has not been measured yet.
    pub fallback_size: Size,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            viewport_margin: 8.0,
            arrow_corner_margin: 12.0,
            arrow_max_distance: 200.0,
            slide_suppress_distance: 150.0,
            pointer_gap: 5.0,
            fallback_size: Size::new(200.0, 40.0),
        }
    }
}

/// Input to [`compute_placement`](crate::compute_placement).
///
/// `size` is the measured overlay size when the host has a live, laid-out
/// overlay to measure; `None` falls back to
/// [`Tunables::fallback_size`]. `last_position` is the previously rendered
/// top-left, used only for transition suppression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// What the overlay is anchored to.
    pub anchor: Anchor,
    /// Measured overlay size, if available.
    pub size: Option<Size>,
    /// Side preference.
    pub preference: Preference,
    /// Gap between the anchor rectangle and the overlay.
    pub offset: f64,
    /// Point-mode position override.
    pub stick_to_edge: StickToEdge,
    /// Resolved writing direction.
    pub direction: Direction,
    /// Current window size, in the same coordinate space as the anchor.
    pub window: Size,
    /// Previously rendered top-left position, if any.
    pub last_position: Option<Point>,
    /// Overlay rotation in radians, folded into the arrow rotation.
    pub rotation: f64,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            anchor: Anchor::Pointer(Point::ZERO),
            size: None,
            preference: Preference::Auto,
            offset: 8.0,
            stick_to_edge: StickToEdge::None,
            direction: Direction::Ltr,
            window: Size::new(1024.0, 768.0),
            last_position: None,
            rotation: 0.0,
        }
    }
}

/// The computed placement: where the overlay goes and how to decorate it.
///
/// Ephemeral — recomputed on every call and folded into host state, never
/// persisted by this crate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Viewport coordinates of the overlay's top-left corner, clamped so the
    /// overlay never renders off-screen.
    pub position: Point,
    /// The side that was chosen. In point-based mode this is bookkeeping
    /// only (`Right` in LTR, `Left` in RTL).
    pub side: Side,
    /// Arrow anchor point, relative to the overlay's top-left.
    pub arrow: Point,
    /// Whether the arrow should be drawn at all.
    pub arrow_visible: bool,
    /// Rotation (radians) the arrow glyph needs to point at the target,
    /// including the request's own rotation. `None` when no arrow is drawn.
    pub arrow_rotation: Option<f64>,
    /// The direction the placement was computed for.
    pub direction: Direction,
    /// The overlay size the placement was computed with (measured or
    /// fallback).
    pub size: Size,
    /// Whether the transition to this position should be suppressed because
    /// the displacement since `last_position` is too large to animate.
    pub disable_transition: bool,
}
