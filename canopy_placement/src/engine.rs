// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement search: candidate sides, fit testing, fallback order,
//! viewport clamping, and arrow anchoring.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Point, Rect, Size};

use crate::bounds::{Direction, fits, viewport_bounds};
use crate::types::{Anchor, Placement, PlacementRequest, Preference, Side, StickToEdge, Tunables};

/// Compute where the overlay should go for the given request.
///
/// Element-based anchors run the four-candidate search described in the crate
/// docs; pointer anchors trail the pointer with a lateral gap and draw no
/// arrow. In both modes the returned position is clamped to
/// [`viewport_bounds`] — the overlay never renders off-screen, even when that
/// means covering its own target.
#[must_use]
pub fn compute_placement(request: &PlacementRequest, tunables: &Tunables) -> Placement {
    let size = request.size.unwrap_or(tunables.fallback_size);
    let bounds = viewport_bounds(request.window, tunables.viewport_margin);

    let mut placement = match request.anchor {
        Anchor::Pointer(point) => place_at_pointer(point, size, request, bounds, tunables),
        Anchor::Target(target) => place_at_target(target, size, request, bounds, tunables),
    };

    placement.disable_transition = match request.last_position {
        Some(last) => last.distance(placement.position) > tunables.slide_suppress_distance,
        None => false,
    };
    placement
}

fn place_at_pointer(
    point: Point,
    size: Size,
    request: &PlacementRequest,
    bounds: Rect,
    tunables: &Tunables,
) -> Placement {
    // Trail the pointer laterally so the cursor does not occlude the overlay,
    // and center on it vertically.
    let x = match request.direction {
        Direction::Ltr => point.x + tunables.pointer_gap,
        Direction::Rtl => point.x - size.width - tunables.pointer_gap,
    };
    let mut position = Point::new(x, point.y - size.height / 2.0);

    match request.stick_to_edge {
        StickToEdge::None => {}
        StickToEdge::Edge(Side::Left) => position.x = 0.0,
        StickToEdge::Edge(Side::Top) => position.y = 0.0,
        StickToEdge::Edge(Side::Right) => position.x = request.window.width - size.width,
        StickToEdge::Edge(Side::Bottom) => position.y = request.window.height - size.height,
        StickToEdge::At(at) => position = at,
    }

    // Bookkeeping only: the overlay sits to the pointer's trailing side.
    let side = match request.direction {
        Direction::Ltr => Side::Right,
        Direction::Rtl => Side::Left,
    };

    Placement {
        position: clamp_to_bounds(position, size, bounds),
        side,
        arrow: Point::ZERO,
        arrow_visible: false,
        arrow_rotation: None,
        direction: request.direction,
        size,
        disable_transition: false,
    }
}

fn place_at_target(
    target: Rect,
    size: Size,
    request: &PlacementRequest,
    bounds: Rect,
    tunables: &Tunables,
) -> Placement {
    let side = choose_side(target, size, request, bounds);
    let ideal = candidate_position(side, target, size, request.offset);
    let position = clamp_to_bounds(ideal, size, bounds);

    let (arrow, arrow_visible) = arrow_anchor(side, position, size, target, tunables);
    let arrow_rotation = arrow_visible.then(|| arrow_base_angle(side) + request.rotation);

    Placement {
        position,
        side,
        arrow,
        arrow_visible,
        arrow_rotation,
        direction: request.direction,
        size,
        disable_transition: false,
    }
}

/// Ideal (unclamped) top-left position for the overlay on the given side,
/// centered on the target's cross axis.
fn candidate_position(side: Side, target: Rect, size: Size, offset: f64) -> Point {
    let center = target.center();
    match side {
        Side::Top => Point::new(center.x - size.width / 2.0, target.y0 - size.height - offset),
        Side::Bottom => Point::new(center.x - size.width / 2.0, target.y1 + offset),
        Side::Left => Point::new(target.x0 - size.width - offset, center.y - size.height / 2.0),
        Side::Right => Point::new(target.x1 + offset, center.y - size.height / 2.0),
    }
}

/// Fit test for one candidate side.
///
/// The cross axis is clamped into the bounds before testing: a target near a
/// screen corner can still take a vertical side as long as there is room on
/// the primary axis — the final clamp will slide the overlay along the edge.
fn side_fits(side: Side, target: Rect, size: Size, offset: f64, bounds: Rect) -> bool {
    let mut origin = candidate_position(side, target, size, offset);
    match side {
        Side::Top | Side::Bottom => {
            origin.x = origin.x.min(bounds.x1 - size.width).max(bounds.x0);
        }
        Side::Left | Side::Right => {
            origin.y = origin.y.min(bounds.y1 - size.height).max(bounds.y0);
        }
    }
    fits(Rect::from_origin_size(origin, size), bounds)
}

/// Pick a side, honoring the preference and the fallback orders.
fn choose_side(target: Rect, size: Size, request: &PlacementRequest, bounds: Rect) -> Side {
    let try_side = |side: Side| side_fits(side, target, size, request.offset, bounds);

    match request.preference {
        Preference::Fixed(preferred) => {
            if try_side(preferred) {
                return preferred;
            }
            // Requested side does not fit: fixed fallback order, then force
            // the original preference (accepted overflow, not an error).
            for side in [Side::Top, Side::Bottom, Side::Right, Side::Left] {
                if try_side(side) {
                    return side;
                }
            }
            preferred
        }
        Preference::Auto => {
            let (near, far) = match request.direction {
                Direction::Ltr => (Side::Right, Side::Left),
                Direction::Rtl => (Side::Left, Side::Right),
            };
            for side in [Side::Top, Side::Bottom, near, far] {
                if try_side(side) {
                    return side;
                }
            }
            Side::Top
        }
    }
}

fn clamp_to_bounds(position: Point, size: Size, bounds: Rect) -> Point {
    // `min` before `max` so that when the overlay is larger than the bounds
    // the top-left edge wins.
    Point::new(
        position.x.min(bounds.x1 - size.width).max(bounds.x0),
        position.y.min(bounds.y1 - size.height).max(bounds.y0),
    )
}

/// Arrow anchor on the overlay edge nearest the target, slid along that edge
/// to point at the target's center and kept clear of the corners.
///
/// Returns the anchor (relative to the overlay's top-left) and whether the
/// arrow should be drawn at all: once clamping has pushed the overlay center
/// farther from the target center than the visibility threshold, the arrow
/// would point at empty space and is hidden instead.
fn arrow_anchor(
    side: Side,
    position: Point,
    size: Size,
    target: Rect,
    tunables: &Tunables,
) -> (Point, bool) {
    let margin = tunables.arrow_corner_margin;
    let along_x = (target.center().x - position.x).min(size.width - margin).max(margin);
    let along_y = (target.center().y - position.y).min(size.height - margin).max(margin);

    let anchor = match side {
        Side::Top => Point::new(along_x, size.height),
        Side::Bottom => Point::new(along_x, 0.0),
        Side::Left => Point::new(size.width, along_y),
        Side::Right => Point::new(0.0, along_y),
    };

    let overlay_center = position + size.to_vec2() / 2.0;
    let visible = overlay_center.distance(target.center()) <= tunables.arrow_max_distance;
    (anchor, visible)
}

/// Rotation for an arrow glyph that points up at angle zero, in screen
/// coordinates (positive angles turn clockwise).
fn arrow_base_angle(side: Side) -> f64 {
    match side {
        // Overlay below the target: arrow on the top edge points up.
        Side::Bottom => 0.0,
        // Overlay above the target: arrow on the bottom edge points down.
        Side::Top => PI,
        // Overlay left of the target: arrow on the right edge points right.
        Side::Left => FRAC_PI_2,
        // Overlay right of the target: arrow on the left edge points left.
        Side::Right => -FRAC_PI_2,
    }
}
