// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_trigger --heading-base-level=0

//! Canopy Trigger: per-target tooltip trigger bindings.
//!
//! A [`Trigger`] translates a host's raw input events — hover enter/leave,
//! focus/blur, click — into `show`/`hide` calls on a shared
//! [`TooltipController`](canopy_lifecycle::TooltipController). The binding
//! carries the policy the controller cannot know on its own:
//!
//! - ownership checks, so one target's leave never hides a tooltip that has
//!   already moved on to another target;
//! - click mode, where the first click opens immediately and only a click
//!   outside both the target and the tooltip closes (re-clicking does not
//!   toggle);
//! - touch inertness, where hover-incapable devices get no tooltip behavior
//!   at all unless the options opt in.
//!
//! Hosts own the actual event plumbing: they resolve device [`Capabilities`]
//! once (a media-query style check), measure target geometry into a
//! [`TargetInfo`] per event, and route document-level clicks to
//! [`Trigger::document_click`] while
//! [`Trigger::wants_document_clicks`] is set.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_lifecycle::{TooltipController, TooltipOptions};
//! use canopy_trigger::{Capabilities, TargetInfo, Trigger};
//! use kurbo::{Rect, Size};
//!
//! let mut tooltips: TooltipController<u32, ()> =
//!     TooltipController::new(Size::new(1024.0, 768.0));
//! let mut binding = Trigger::attach(
//!     1,
//!     TooltipOptions::new("Delete this row"),
//!     Capabilities::default(),
//! );
//!
//! let info = TargetInfo::new(Rect::new(450.0, 350.0, 550.0, 390.0));
//! binding.pointer_enter(&mut tooltips, info, 0);
//! tooltips.advance(500); // the hover show delay elapses
//! assert!(tooltips.state().visible);
//!
//! binding.pointer_leave(&mut tooltips, 1_000);
//! tooltips.advance(2_000);
//! assert!(tooltips.state().is_fully_hidden());
//! ```

#![no_std]

extern crate alloc;

mod binding;

pub use binding::{Capabilities, TargetInfo, Trigger};
