// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport math: resolved writing direction, margin-inset bounds, fit tests.

use kurbo::{Rect, Size};

/// Resolved writing direction of the host context.
///
/// Hosts resolve this from their own environment (a DOM element's computed
/// direction, a locale, a layout attribute); this crate only consumes the
/// result. Direction affects the `Auto` side order and point-based placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Compute the usable viewport rectangle: the window inset by `margin` on
/// every edge.
///
/// This is recomputed on every call and never cached — the window can resize
/// between calls, and the caller owns the current window size.
///
/// Degenerate windows (smaller than twice the margin) produce an empty
/// rectangle rather than an inverted one.
#[must_use]
pub fn viewport_bounds(window: Size, margin: f64) -> Rect {
    let right = (window.width - margin).max(margin);
    let bottom = (window.height - margin).max(margin);
    Rect::new(margin, margin, right, bottom)
}

/// Returns `true` iff `rect` lies entirely within `bounds` on all four sides.
#[must_use]
pub fn fits(rect: Rect, bounds: Rect) -> bool {
    rect.x0 >= bounds.x0 && rect.y0 >= bounds.y0 && rect.x1 <= bounds.x1 && rect.y1 <= bounds.y1
}
