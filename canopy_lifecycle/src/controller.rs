// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip lifecycle controller: one live tooltip, debounced shows and
//! hides, transition classification, and subscriber notification.
//!
//! All mutation happens synchronously inside the host's event-loop callbacks
//! (an input event, a fired timer). There are no concurrent writers; races
//! between a pending hide and an interleaving show are resolved by explicit
//! cancellation, never by last-write-wins.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use canopy_placement::{
    Anchor, Direction, Placement, PlacementRequest, Preference, StickToEdge, Tunables,
    compute_placement,
};
use kurbo::{Rect, Size};

use crate::content::Content;
use crate::options::{ShowMode, Timings, TooltipOptions};
use crate::state::TooltipState;
use crate::subscribers::{Registry, Subscription};
use crate::timers::{TimerHandle, TimerQueue};

/// One show call: the target (if any), its measured geometry, and the
/// per-call options.
///
/// A request without a rect or point reuses the controller's last anchor, so
/// "show again with new content" does not require re-measuring the target.
#[derive(Clone, Debug)]
pub struct ShowRequest<K, N> {
    /// The target key owning this show, used for ownership checks.
    pub target: Option<K>,
    /// The target's bounding rectangle in viewport coordinates.
    pub rect: Option<Rect>,
    /// Measured tooltip dimensions, when the host has a live overlay to
    /// measure; `None` falls back to
    /// [`Tunables::fallback_size`](canopy_placement::Tunables).
    pub size: Option<Size>,
    /// Resolved writing direction of the target.
    pub direction: Direction,
    /// How the show was initiated; decides the default show delay.
    pub mode: ShowMode,
    /// Per-call options.
    pub options: TooltipOptions<N>,
}

impl<K, N> ShowRequest<K, N> {
    /// A manual show request: no target, immediate (click-mode) timing.
    #[must_use]
    pub fn new(options: TooltipOptions<N>) -> Self {
        Self {
            target: None,
            rect: None,
            size: None,
            direction: Direction::Ltr,
            mode: ShowMode::Click,
            options,
        }
    }

    /// Anchor the show to a target element.
    #[must_use]
    pub fn target(mut self, key: K, rect: Rect) -> Self {
        self.target = Some(key);
        self.rect = Some(rect);
        self
    }

    /// Supply measured tooltip dimensions.
    #[must_use]
    pub fn measured(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the resolved writing direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set how the show was initiated.
    #[must_use]
    pub fn mode(mut self, mode: ShowMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Everything needed to mutate state into the "shown" shape, staged so the
/// fade-through path can apply it at the half-transition mark.
#[derive(Clone, Debug)]
struct Staged<K, N> {
    placement: Placement,
    content: Content<N>,
    target: Option<K>,
    mode: ShowMode,
    stick_to_edge: StickToEdge,
    rotation: f64,
    allow_pointer_events: bool,
}

/// Placement inputs kept for `update_position` recomputation.
#[derive(Copy, Clone, Debug)]
struct Recompute {
    preference: Preference,
    offset: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerKind {
    Show,
    HideStart,
    HideFinish,
    FadeSwap,
    FadeEnd,
    ReenableTransition,
    AutoHide,
}

/// The lifecycle controller. One per host "window"; it owns the single
/// active [`TooltipState`] — there are never concurrent tooltips.
///
/// The controller never owns a clock: every operation takes the current
/// monotonic time in milliseconds, and the host drives pending timers with
/// [`advance`](Self::advance), waking up at
/// [`next_deadline`](Self::next_deadline).
pub struct TooltipController<K, N> {
    state: TooltipState<K, N>,
    timings: Timings,
    tunables: Tunables,
    window: Size,
    enabled: bool,

    timers: TimerQueue<TimerKind>,
    show_handle: Option<TimerHandle>,
    pending_show: Option<ShowRequest<K, N>>,
    hide_start: Option<TimerHandle>,
    hide_finish: Option<TimerHandle>,
    fade_swap: Option<(TimerHandle, Staged<K, N>)>,
    fade_end: Option<TimerHandle>,
    reenable: Option<TimerHandle>,
    auto_hide: Option<TimerHandle>,

    hide_callbacks: SmallVec<[Box<dyn FnOnce()>; 2]>,
    subscribers: Registry<K, N>,

    last_anchor: Option<Anchor>,
    last_size: Option<Size>,
    recompute: Option<Recompute>,
}

impl<K, N> TooltipController<K, N>
where
    K: Copy + PartialEq,
    N: Clone + PartialEq,
{
    /// A controller for the given window size, with default timings and
    /// placement tunables.
    #[must_use]
    pub fn new(window: Size) -> Self {
        Self::with_config(window, Timings::default(), Tunables::default())
    }

    /// A controller with explicit timing and placement configuration.
    #[must_use]
    pub fn with_config(window: Size, timings: Timings, tunables: Tunables) -> Self {
        Self {
            state: TooltipState::default(),
            timings,
            tunables,
            window,
            enabled: true,
            timers: TimerQueue::new(),
            show_handle: None,
            pending_show: None,
            hide_start: None,
            hide_finish: None,
            fade_swap: None,
            fade_end: None,
            reenable: None,
            auto_hide: None,
            hide_callbacks: SmallVec::new(),
            subscribers: Registry::new(),
            last_anchor: None,
            last_size: None,
            recompute: None,
        }
    }

    /// The current state. Read-only snapshot contract: callers must not
    /// assume it stays valid across the next operation, and must not mutate
    /// a clone expecting the controller to notice.
    #[must_use]
    pub fn state(&self) -> &TooltipState<K, N> {
        &self.state
    }

    /// The target currently owning the tooltip (visible or fading out).
    #[must_use]
    pub fn current_target(&self) -> Option<K> {
        self.state.target
    }

    /// The target of a scheduled-but-not-yet-performed show, if any.
    #[must_use]
    pub fn pending_show_target(&self) -> Option<K> {
        self.pending_show.as_ref().and_then(|request| request.target)
    }

    /// Whether the controller currently accepts shows.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Update the window size used for viewport clamping. Call
    /// [`update_position`](Self::update_position) afterwards to re-fit a
    /// visible tooltip.
    pub fn set_window(&mut self, window: Size) {
        self.window = window;
    }

    /// Subscribe to state changes. Callbacks run in registration order and
    /// receive the freshly updated state.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&TooltipState<K, N>) + 'static,
    ) -> Subscription {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Remove a subscription. Returns `false` for stale ids.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.unsubscribe(subscription)
    }

    /// The earliest pending timer deadline, for host wakeup scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fire all timers due at or before `now`, in deadline order.
    ///
    /// Timers that a fired timer schedules are themselves fired in the same
    /// call when their deadline has already elapsed, so a single large
    /// `advance` settles the whole machine deterministically.
    pub fn advance(&mut self, now: u64) {
        while let Some(deadline) = self.timers.next_deadline().filter(|d| *d <= now) {
            if let Some((handle, kind)) = self.timers.pop_due(now) {
                self.fire(handle, kind, deadline);
            }
        }
    }

    /// Request a show.
    ///
    /// Any pending hide is canceled first — a show always wins the race
    /// against a not-yet-fired hide. The show itself is debounced by the
    /// mode's show delay (hover: [`Timings::show_delay`]; click/manual:
    /// immediate), unless the request's options override it. If the resolved
    /// content turns out empty, the call behaves as [`hide`](Self::hide).
    pub fn show(&mut self, request: ShowRequest<K, N>, now: u64) {
        if !self.enabled {
            return;
        }
        self.cancel_pending_hide();
        self.cancel_auto_hide();
        self.cancel_pending_show();

        let delay = request.options.show_delay.unwrap_or(match request.mode {
            ShowMode::Hover => self.timings.show_delay,
            ShowMode::Click => 0,
        });
        if delay == 0 {
            self.perform_show(request, now);
        } else {
            self.show_handle = Some(self.timers.schedule(now + delay, TimerKind::Show));
            self.pending_show = Some(request);
        }
    }

    /// Request a hide after the default hide delay.
    pub fn hide(&mut self, now: u64) {
        self.hide_inner(now, None, None);
    }

    /// Request a hide and run `callback` once the tooltip is fully hidden.
    ///
    /// If a hide is already pending the callback joins its queue rather than
    /// starting a second timer; if the tooltip is already fully hidden the
    /// callback runs synchronously. Queued callbacks run in FIFO order.
    pub fn hide_with(&mut self, now: u64, callback: impl FnOnce() + 'static) {
        self.hide_inner(now, None, Some(Box::new(callback)));
    }

    /// Request a hide with an explicit delay before the fade-out starts.
    pub fn hide_after(&mut self, now: u64, delay_ms: u64) {
        self.hide_inner(now, Some(delay_ms), None);
    }

    /// Hide right now: no debounce, no fade. Pending timers are canceled and
    /// queued hide callbacks still run — correctness over smoothness on
    /// teardown paths.
    pub fn hide_immediate(&mut self) {
        self.cancel_pending_show();
        self.cancel_auto_hide();
        self.cancel_fade();
        self.cancel_reenable();
        if let Some(handle) = self.hide_start.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.hide_finish.take() {
            self.timers.cancel(handle);
        }

        let was_hidden = self.state.is_fully_hidden();
        self.state.visible = false;
        self.state.transitioning = false;
        self.state.target = None;
        self.drain_hide_callbacks();
        if !was_hidden {
            self.notify();
        }
    }

    /// Recompute geometry for the visible tooltip against its existing
    /// anchor (window resize, scroll). Silent no-op when nothing is visible.
    ///
    /// `rect` is the target's fresh bounding rectangle when the host has
    /// one; `None` reuses the last known anchor.
    pub fn update_position(&mut self, rect: Option<Rect>) {
        if !self.state.visible {
            return;
        }
        if let Some(rect) = rect {
            // A fresh rect only replaces an element anchor; pointer anchors
            // are driven by pointer moves, not target layout.
            if matches!(self.last_anchor, Some(Anchor::Target(_)) | None) {
                self.last_anchor = Some(Anchor::Target(rect));
            }
        }
        let (Some(anchor), Some(inputs)) = (self.last_anchor, self.recompute) else {
            return;
        };

        let placement = compute_placement(
            &PlacementRequest {
                anchor,
                size: self.last_size,
                preference: inputs.preference,
                offset: inputs.offset,
                stick_to_edge: self.state.stick_to_edge,
                direction: self.state.direction,
                window: self.window,
                last_position: Some(self.state.position),
                rotation: self.state.rotation,
            },
            &self.tunables,
        );
        self.apply_geometry(&placement);
        self.notify();
    }

    /// Global kill switch. Disabling ignores in-flight shows and hides the
    /// active tooltip immediately.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.hide_immediate();
        }
    }

    /// Cancel all pending timers, drop all bookkeeping, reset state to
    /// defaults, and notify subscribers once. Queued hide callbacks run
    /// before the reset. Subscriptions survive; the controller is reusable.
    pub fn destroy(&mut self) {
        self.timers.clear();
        self.show_handle = None;
        self.pending_show = None;
        self.hide_start = None;
        self.hide_finish = None;
        self.fade_swap = None;
        self.fade_end = None;
        self.reenable = None;
        self.auto_hide = None;
        self.last_anchor = None;
        self.last_size = None;
        self.recompute = None;
        self.drain_hide_callbacks();
        self.state = TooltipState::default();
        self.notify();
    }


    fn perform_show(&mut self, request: ShowRequest<K, N>, now: u64) {
        self.cancel_fade();
        self.cancel_reenable();

        let Some(content) = request.options.content.resolve() else {
            // Empty content: an implicit hide, not an error.
            self.hide_inner(now, request.options.hide_delay, None);
            return;
        };
        let anchor = request
            .options
            .point
            .map(Anchor::Pointer)
            .or(request.rect.map(Anchor::Target))
            .or(self.last_anchor);
        let Some(anchor) = anchor else {
            // Nothing to anchor to and no history to reuse.
            return;
        };

        let size = request.size.or(self.last_size);
        let placement = compute_placement(
            &PlacementRequest {
                anchor,
                size,
                preference: request.options.preference,
                offset: request.options.offset,
                stick_to_edge: request.options.stick_to_edge,
                direction: request.direction,
                window: self.window,
                last_position: self.state.visible.then_some(self.state.position),
                rotation: request.options.rotation,
            },
            &self.tunables,
        );
        self.last_anchor = Some(anchor);
        self.last_size = size;
        self.recompute = Some(Recompute {
            preference: request.options.preference,
            offset: request.options.offset,
        });

        let staged = Staged {
            placement,
            content,
            target: request.target,
            mode: request.mode,
            stick_to_edge: request.options.stick_to_edge,
            rotation: request.options.rotation,
            allow_pointer_events: request.options.allow_pointer_events,
        };

        if self.state.visible {
            self.reposition_visible(staged, now);
        } else {
            self.apply_staged(staged, None);
            self.state.visible = true;
            self.state.transitioning = false;
            self.notify();
        }

        if let Some(ms) = request.options.auto_hide_after {
            self.auto_hide = Some(self.timers.schedule(now + ms, TimerKind::AutoHide));
        }
    }

    /// Classify a show against the already-visible tooltip by displacement:
    /// glide in place, fade through, or jump instantly.
    fn reposition_visible(&mut self, staged: Staged<K, N>, now: u64) {
        let displacement = self.state.position.distance(staged.placement.position);
        let content_changed = self.state.content.as_ref() != Some(&staged.content);

        if displacement <= self.timings.transform_threshold && !content_changed {
            // Close and unchanged: glide, no re-entry animation.
            self.apply_staged(staged, Some(false));
            self.state.transitioning = false;
            self.notify();
        } else if displacement <= self.timings.fade_threshold {
            // Cross-fade: swap position and content at the halfway mark.
            self.state.transitioning = true;
            self.notify();
            let handle = self
                .timers
                .schedule(now + self.timings.transition / 2, TimerKind::FadeSwap);
            self.fade_swap = Some((handle, staged));
        } else {
            // Too far to animate: jump with transitions off for one frame.
            self.apply_staged(staged, Some(true));
            self.state.transitioning = false;
            self.notify();
            self.reenable = Some(
                self.timers
                    .schedule(now + self.timings.frame, TimerKind::ReenableTransition),
            );
        }
    }

    fn hide_inner(&mut self, now: u64, delay: Option<u64>, callback: Option<Box<dyn FnOnce()>>) {
        if self.hide_start.is_some() || self.hide_finish.is_some() {
            // A hide is already pending; join it rather than restart it.
            if let Some(callback) = callback {
                self.hide_callbacks.push(callback);
            }
            return;
        }
        self.cancel_pending_show();
        self.cancel_auto_hide();
        self.cancel_fade();

        if self.state.is_fully_hidden() {
            if let Some(callback) = callback {
                callback();
            }
            return;
        }
        if let Some(callback) = callback {
            self.hide_callbacks.push(callback);
        }
        let delay = delay.unwrap_or(self.timings.fade_out_delay);
        self.hide_start = Some(self.timers.schedule(now + delay, TimerKind::HideStart));
    }

    fn fire(&mut self, handle: TimerHandle, kind: TimerKind, now: u64) {
        match kind {
            TimerKind::Show => {
                if self.show_handle == Some(handle) {
                    self.show_handle = None;
                    if let Some(request) = self.pending_show.take() {
                        self.perform_show(request, now);
                    }
                }
            }
            TimerKind::HideStart => {
                if self.hide_start == Some(handle) {
                    self.hide_start = None;
                    // Phase one: stay visible, start the fade-out.
                    self.state.transitioning = true;
                    self.notify();
                    self.hide_finish = Some(
                        self.timers
                            .schedule(now + self.timings.transition, TimerKind::HideFinish),
                    );
                }
            }
            TimerKind::HideFinish => {
                if self.hide_finish == Some(handle) {
                    self.hide_finish = None;
                    // Phase two: the terminal fully-hidden state.
                    self.state.visible = false;
                    self.state.transitioning = false;
                    self.state.target = None;
                    self.drain_hide_callbacks();
                    self.notify();
                }
            }
            TimerKind::FadeSwap => {
                if self.fade_swap.as_ref().is_some_and(|(h, _)| *h == handle) {
                    if let Some((_, staged)) = self.fade_swap.take() {
                        self.apply_staged(staged, Some(false));
                        self.notify();
                        self.fade_end = Some(
                            self.timers
                                .schedule(now + self.timings.transition / 2, TimerKind::FadeEnd),
                        );
                    }
                }
            }
            TimerKind::FadeEnd => {
                if self.fade_end == Some(handle) {
                    self.fade_end = None;
                    self.state.transitioning = false;
                    self.notify();
                }
            }
            TimerKind::ReenableTransition => {
                if self.reenable == Some(handle) {
                    self.reenable = None;
                    self.state.disable_transition = false;
                    self.notify();
                }
            }
            TimerKind::AutoHide => {
                if self.auto_hide == Some(handle) {
                    self.auto_hide = None;
                    self.hide_inner(now, None, None);
                }
            }
        }
    }

    fn apply_geometry(&mut self, placement: &Placement) {
        self.state.position = placement.position;
        self.state.side = placement.side;
        self.state.arrow = placement.arrow;
        self.state.arrow_visible = placement.arrow_visible;
        self.state.arrow_rotation = placement.arrow_rotation;
        self.state.direction = placement.direction;
        self.state.size = placement.size;
        self.state.disable_transition = placement.disable_transition;
    }

    fn apply_staged(&mut self, staged: Staged<K, N>, disable_transition: Option<bool>) {
        self.apply_geometry(&staged.placement);
        if let Some(forced) = disable_transition {
            self.state.disable_transition = forced;
        }
        self.state.content = Some(staged.content);
        self.state.target = staged.target;
        self.state.show_mode = staged.mode;
        self.state.stick_to_edge = staged.stick_to_edge;
        self.state.rotation = staged.rotation;
        self.state.allow_pointer_events = staged.allow_pointer_events;
    }

    fn cancel_pending_show(&mut self) {
        if let Some(handle) = self.show_handle.take() {
            self.timers.cancel(handle);
        }
        self.pending_show = None;
    }

    /// Cancel a pending hide in either phase. If the fade-out had already
    /// started, the still-visible tooltip is resurrected.
    fn cancel_pending_hide(&mut self) {
        if let Some(handle) = self.hide_start.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.hide_finish.take() {
            self.timers.cancel(handle);
            if self.state.transitioning {
                self.state.transitioning = false;
                self.notify();
            }
        }
    }

    fn cancel_fade(&mut self) {
        if let Some((handle, _)) = self.fade_swap.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.fade_end.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_reenable(&mut self) {
        if let Some(handle) = self.reenable.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_auto_hide(&mut self) {
        if let Some(handle) = self.auto_hide.take() {
            self.timers.cancel(handle);
        }
    }

    /// Swap the queue out before draining so a callback that re-triggers a
    /// hide enqueues into a fresh queue, not the one being iterated.
    fn drain_hide_callbacks(&mut self) {
        let callbacks = core::mem::take(&mut self.hide_callbacks);
        for callback in callbacks {
            callback();
        }
    }

    fn notify(&mut self) {
        self.subscribers.notify(&self.state);
    }
}

impl<K: fmt::Debug, N: fmt::Debug> fmt::Debug for TooltipController<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipController")
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("window", &self.window)
            .field("pending_timers", &self.timers.len())
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
