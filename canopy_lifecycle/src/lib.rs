// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_lifecycle --heading-base-level=0

//! Tooltip lifecycle management: debounced, cancelable show/hide with
//! transition classification.
//!
//! The heart of the crate is [`TooltipController`], a host-agnostic state
//! machine owning the single live [`TooltipState`]. Hosts feed it show and
//! hide requests (with the current monotonic time in milliseconds), drive its
//! pending timers via [`TooltipController::advance`], and render whatever the
//! state says via [`TooltipController::subscribe`]. Geometry comes from
//! [`canopy_placement`]; trigger plumbing (hover, focus, click) lives in
//! `canopy_trigger`.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_lifecycle::{ShowRequest, TooltipController, TooltipOptions};
//! use kurbo::{Rect, Size};
//!
//! let mut tooltips: TooltipController<u32, ()> =
//!     TooltipController::new(Size::new(1024.0, 768.0));
//!
//! let request = ShowRequest::new(TooltipOptions::new("Save the document"))
//!     .target(7, Rect::new(450.0, 350.0, 550.0, 390.0));
//! tooltips.show(request, 0);
//! assert!(tooltips.state().visible);
//!
//! tooltips.hide(1_000);
//! let deadline = tooltips.next_deadline().unwrap();
//! tooltips.advance(deadline + 150);
//! assert!(tooltips.state().is_fully_hidden());
//! ```
#![no_std]

extern crate alloc;

mod content;
mod controller;
mod options;
mod state;
mod subscribers;
pub mod timers;

pub use content::{Content, ContentSource};
pub use controller::{ShowRequest, TooltipController};
pub use options::{ShowMode, Timings, TooltipOptions};
pub use state::TooltipState;
pub use subscribers::Subscription;
