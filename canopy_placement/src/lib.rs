// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_placement --heading-base-level=0

//! Canopy Placement: viewport-fit placement for floating overlays.
//!
//! This crate decides where a floating overlay (a tooltip bubble, a popover)
//! should appear relative to an anchor: either a target rectangle or a bare
//! pointer coordinate. It is purely geometric — it knows nothing about
//! elements, events, timers, or rendering. Hosts resolve their own anchors
//! (for example by measuring a DOM element or a widget's layout box) and feed
//! the numbers in.
//!
//! The core pieces are:
//!
//! - [`viewport_bounds`] and [`fits`]: viewport math with a fixed edge margin.
//! - [`compute_placement`]: the full placement search. Four candidate sides
//!   are fit-tested against the viewport, a side is chosen (honoring an
//!   explicit [`Preference`] with a fixed fallback order, or the
//!   direction-aware `Auto` order), the result is clamped so it never renders
//!   off-screen, and an arrow anchor is derived — or hidden when clamping has
//!   pushed the overlay too far from its anchor to point at it honestly.
//! - [`Tunables`]: the empirically tuned constants (edge margin, arrow corner
//!   margin, arrow visibility distance, transition suppression distance).
//!   They are configuration, not correctness requirements.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use canopy_placement::{
//!     compute_placement, Anchor, Direction, PlacementRequest, Preference, Side, Tunables,
//! };
//!
//! let request = PlacementRequest {
//!     anchor: Anchor::Target(Rect::new(400.0, 300.0, 480.0, 330.0)),
//!     size: Some(Size::new(200.0, 40.0)),
//!     preference: Preference::Fixed(Side::Top),
//!     ..PlacementRequest::default()
//! };
//! let placement = compute_placement(&request, &Tunables::default());
//!
//! // Ample room above the target, so the preference holds.
//! assert_eq!(placement.side, Side::Top);
//! assert!(placement.arrow_visible);
//! ```
//!
//! When no side fits cleanly, the engine clamps and accepts partial overflow;
//! that is defined, degraded behavior, never an error.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod bounds;
mod engine;
mod types;

pub use bounds::{Direction, fits, viewport_bounds};
pub use engine::compute_placement;
pub use types::{Anchor, Placement, PlacementRequest, Preference, Side, StickToEdge, Tunables};
