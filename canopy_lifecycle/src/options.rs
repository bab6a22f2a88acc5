// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-call tooltip options and the controller's timing constants.

use canopy_placement::{Preference, StickToEdge};
use kurbo::Point;

use crate::content::ContentSource;

/// How a show was initiated. Hover shows are debounced with the default show
/// delay; click (and manual) shows happen immediately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ShowMode {
    /// Initiated by hover or keyboard focus.
    #[default]
    Hover,
    /// Initiated by a click or a direct/manual call.
    Click,
}

/// Per-call configuration for a show. Not persisted: each show carries its
/// own options.
#[derive(Clone, Debug)]
pub struct TooltipOptions<N> {
    /// What to display. Resolved once at show time; empty content turns the
    /// show into a hide.
    pub content: ContentSource<N>,
    /// Placement side preference.
    pub preference: Preference,
    /// Gap between the target and the tooltip.
    pub offset: f64,
    /// Show delay override in milliseconds; `None` uses the mode default
    /// ([`Timings::show_delay`] for hover, `0` for click/manual).
    pub show_delay: Option<u64>,
    /// Hide delay override in milliseconds; `None` uses
    /// [`Timings::fade_out_delay`].
    pub hide_delay: Option<u64>,
    /// Skip the binding entirely on hover-incapable (touch) devices.
    pub disable_on_touch: bool,
    /// Let the rendered tooltip receive pointer events.
    pub allow_pointer_events: bool,
    /// Point-mode position override.
    pub stick_to_edge: StickToEdge,
    /// Anchor to this pointer coordinate instead of the target's rectangle.
    pub point: Option<Point>,
    /// Show on click instead of hover.
    pub show_on_click: bool,
    /// Show on hover/focus (the default trigger path).
    pub show_on_hover: bool,
    /// Hide unconditionally this many milliseconds after showing.
    pub auto_hide_after: Option<u64>,
    /// Tooltip rotation in radians, folded into the arrow rotation.
    pub rotation: f64,
}

impl<N> TooltipOptions<N> {
    /// Options with the given content and defaults for everything else.
    #[must_use]
    pub fn new(content: impl Into<ContentSource<N>>) -> Self {
        Self {
            content: content.into(),
            preference: Preference::Auto,
            offset: 8.0,
            show_delay: None,
            hide_delay: None,
            disable_on_touch: true,
            allow_pointer_events: false,
            stick_to_edge: StickToEdge::None,
            point: None,
            show_on_click: false,
            show_on_hover: true,
            auto_hide_after: None,
            rotation: 0.0,
        }
    }

    /// Set the placement preference.
    #[must_use]
    pub fn preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the target/tooltip gap.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Override the show delay.
    #[must_use]
    pub fn show_delay(mut self, ms: u64) -> Self {
        self.show_delay = Some(ms);
        self
    }

    /// Override the hide delay.
    #[must_use]
    pub fn hide_delay(mut self, ms: u64) -> Self {
        self.hide_delay = Some(ms);
        self
    }

    /// Set whether touch devices skip the binding.
    #[must_use]
    pub fn disable_on_touch(mut self, disable: bool) -> Self {
        self.disable_on_touch = disable;
        self
    }

    /// Let the tooltip receive pointer events.
    #[must_use]
    pub fn allow_pointer_events(mut self, allow: bool) -> Self {
        self.allow_pointer_events = allow;
        self
    }

    /// Set the point-mode edge override.
    #[must_use]
    pub fn stick_to_edge(mut self, stick: StickToEdge) -> Self {
        self.stick_to_edge = stick;
        self
    }

    /// Anchor to a pointer coordinate instead of the target rectangle.
    #[must_use]
    pub fn point(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }

    /// Show on click instead of hover.
    #[must_use]
    pub fn show_on_click(mut self, on_click: bool) -> Self {
        self.show_on_click = on_click;
        self
    }

    /// Enable or disable the hover trigger path.
    #[must_use]
    pub fn show_on_hover(mut self, on_hover: bool) -> Self {
        self.show_on_hover = on_hover;
        self
    }

    /// Hide unconditionally after this many milliseconds.
    #[must_use]
    pub fn auto_hide_after(mut self, ms: u64) -> Self {
        self.auto_hide_after = Some(ms);
        self
    }

    /// Rotate the tooltip (radians).
    #[must_use]
    pub fn rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }
}

/// Timing constants for the lifecycle state machine.
///
/// Like the placement [`Tunables`](canopy_placement::Tunables), these are
/// hand-tuned configuration, not correctness requirements. The total default
/// hide latency is `fade_out_delay + transition` (250 ms).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timings {
    /// Delay before a hover-initiated show takes effect.
    pub show_delay: u64,
    /// Debounce window before a hide starts fading; a show arriving within
    /// it wins the race and cancels the hide.
    pub fade_out_delay: u64,
    /// Duration of the fade/hide transition.
    pub transition: u64,
    /// A show displaced at most this far (with unchanged content) moves the
    /// visible tooltip in place.
    pub transform_threshold: f64,
    /// A show displaced at most this far fades through; farther jumps are
    /// instant.
    pub fade_threshold: f64,
    /// One frame; how long `disable_transition` stays set on an instant jump.
    pub frame: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            show_delay: 500,
            fade_out_delay: 100,
            transition: 150,
            transform_threshold: 100.0,
            fade_threshold: 200.0,
            frame: 16,
        }
    }
}
