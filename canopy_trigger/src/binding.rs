// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-target trigger binding state machine.

use canopy_lifecycle::{ShowMode, ShowRequest, TooltipController, TooltipOptions};
use canopy_placement::Direction;
use kurbo::{Point, Rect, Size};

/// Input-device capabilities, resolved by the host (a media-query style
/// check, never user-agent sniffing).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the primary input device can hover.
    pub hover: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { hover: true }
    }
}

/// The target's geometry at event time, measured by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetInfo {
    /// The target's bounding rectangle in viewport coordinates.
    pub rect: Rect,
    /// Resolved writing direction of the target.
    pub direction: Direction,
    /// Measured tooltip dimensions, when the host has a mounted overlay to
    /// measure; `None` uses the placement fallback size.
    pub size: Option<Size>,
}

impl TargetInfo {
    /// Info for a target rectangle, LTR, unmeasured.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            direction: Direction::Ltr,
            size: None,
        }
    }

    /// Set the resolved writing direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Supply measured tooltip dimensions.
    #[must_use]
    pub fn measured(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// One target element's trigger binding.
///
/// The binding owns no timers and no tooltip state; it translates the host's
/// raw input events (hover enter/leave, focus/blur, click) into `show`/`hide`
/// calls on the shared [`TooltipController`], with the ownership checks that
/// keep one target's leave from hiding another target's tooltip.
///
/// Lifecycle follows the usual attach/update/dispose convention: construct
/// with [`attach`](Self::attach) when the target mounts, swap options with
/// [`update`](Self::update), and call [`dispose`](Self::dispose) on unmount.
/// A disposed binding ignores all further events.
///
/// On hover-incapable devices a binding with
/// [`disable_on_touch`](TooltipOptions::disable_on_touch) set (the default)
/// is inert from birth: every event is a no-op, exactly as if no listeners
/// had been attached.
#[derive(Debug)]
pub struct Trigger<K, N> {
    key: K,
    options: TooltipOptions<N>,
    capabilities: Capabilities,
    disposed: bool,
    /// Click mode only: the tooltip is open on our behalf and the host
    /// should be routing document-level clicks to
    /// [`document_click`](Self::document_click).
    watching_outside: bool,
    last_info: Option<TargetInfo>,
}

impl<K, N> Trigger<K, N>
where
    K: Copy + PartialEq,
    N: Clone + PartialEq,
{
    /// Bind a target. `key` is the host's identifier for the target element;
    /// it must be unique among live bindings sharing one controller.
    #[must_use]
    pub fn attach(key: K, options: TooltipOptions<N>, capabilities: Capabilities) -> Self {
        Self {
            key,
            options,
            capabilities,
            disposed: false,
            watching_outside: false,
            last_info: None,
        }
    }

    /// Replace the binding's options. Takes effect from the next event; it
    /// does not retroactively change an already visible tooltip.
    pub fn update(&mut self, options: TooltipOptions<N>) {
        self.options = options;
    }

    /// The bound target key.
    #[must_use]
    pub fn key(&self) -> K {
        self.key
    }

    /// Whether the binding ignores all events (touch-inert or disposed).
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.disposed || (self.options.disable_on_touch && !self.capabilities.hover)
    }

    /// Whether the host should route document-level clicks to
    /// [`document_click`](Self::document_click).
    #[must_use]
    pub fn wants_document_clicks(&self) -> bool {
        self.watching_outside
    }

    /// The pointer entered the target.
    pub fn pointer_enter(
        &mut self,
        controller: &mut TooltipController<K, N>,
        info: TargetInfo,
        now: u64,
    ) {
        if self.is_inert() || self.options.show_on_click || !self.options.show_on_hover {
            return;
        }
        self.last_info = Some(info);
        controller.show(self.request(info, ShowMode::Hover), now);
    }

    /// The pointer left the target. Hides only while this target still owns
    /// the tooltip (visible or pending), so a leave arriving after the
    /// tooltip moved on to another target changes nothing.
    pub fn pointer_leave(&mut self, controller: &mut TooltipController<K, N>, now: u64) {
        if self.is_inert() || self.options.show_on_click || !self.options.show_on_hover {
            return;
        }
        if self.owns(controller) {
            controller.hide(now);
        }
    }

    /// The target received keyboard focus. Same path as a hover enter.
    pub fn focus(
        &mut self,
        controller: &mut TooltipController<K, N>,
        info: TargetInfo,
        now: u64,
    ) {
        self.pointer_enter(controller, info, now);
    }

    /// The target lost keyboard focus. Same path as a hover leave.
    pub fn blur(&mut self, controller: &mut TooltipController<K, N>, now: u64) {
        self.pointer_leave(controller, now);
    }

    /// The target was clicked. Click mode only: the first click shows
    /// immediately and starts watching for outside clicks; a click while
    /// already open is a no-op — only an outside click or an explicit hide
    /// closes the tooltip.
    pub fn click(
        &mut self,
        controller: &mut TooltipController<K, N>,
        info: TargetInfo,
        now: u64,
    ) {
        if self.is_inert() || !self.options.show_on_click {
            return;
        }
        if self.watching_outside {
            // Only a live watch counts as "open": the tooltip may have closed
            // behind our back (auto-hide, an explicit hide, a disable). A
            // re-click then starts a fresh cycle instead of being swallowed.
            if self.owns(controller) && !controller.state().is_fully_hidden() {
                return;
            }
            self.watching_outside = false;
        }
        self.last_info = Some(info);
        controller.show(self.request(info, ShowMode::Click), now);
        self.watching_outside = true;
    }

    /// A document-level click, routed here while
    /// [`wants_document_clicks`](Self::wants_document_clicks) is set. Clicks
    /// inside the target or inside the rendered tooltip are ignored; any
    /// other click stops the watch and hides.
    pub fn document_click(
        &mut self,
        controller: &mut TooltipController<K, N>,
        point: Point,
        now: u64,
    ) {
        if !self.watching_outside {
            return;
        }
        if !self.owns(controller) {
            // The tooltip already moved on or closed; the watch is stale.
            self.watching_outside = false;
            return;
        }
        if self.last_info.is_some_and(|info| info.rect.contains(point)) {
            return;
        }
        let state = controller.state();
        if state.visible {
            let tooltip = Rect::from_origin_size(state.position, state.size);
            if tooltip.contains(point) {
                return;
            }
        }
        self.watching_outside = false;
        controller.hide(now);
    }

    /// Tear the binding down. If this target currently owns the tooltip
    /// (visible, fading, or pending), it is hidden immediately — no
    /// debounce, no fade — so no tooltip outlives its target.
    pub fn dispose(&mut self, controller: &mut TooltipController<K, N>) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.watching_outside = false;
        if self.owns(controller) {
            controller.hide_immediate();
        }
    }

    fn owns(&self, controller: &TooltipController<K, N>) -> bool {
        controller.current_target() == Some(self.key)
            || controller.pending_show_target() == Some(self.key)
    }

    fn request(&self, info: TargetInfo, mode: ShowMode) -> ShowRequest<K, N> {
        let mut request = ShowRequest::new(self.options.clone())
            .target(self.key, info.rect)
            .direction(info.direction)
            .mode(mode);
        if let Some(size) = info.size {
            request = request.measured(size);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Vec2;

    type Ctrl = TooltipController<u32, u32>;
    type Bind = Trigger<u32, u32>;

    const WINDOW: Size = Size::new(1024.0, 768.0);

    fn ctrl() -> Ctrl {
        TooltipController::new(WINDOW)
    }

    fn info() -> TargetInfo {
        TargetInfo::new(Rect::new(450.0, 350.0, 550.0, 390.0)).measured(Size::new(200.0, 40.0))
    }

    fn hover_binding(key: u32, text: &str) -> Bind {
        Trigger::attach(key, TooltipOptions::new(text), Capabilities::default())
    }

    fn click_binding(key: u32, text: &str) -> Bind {
        Trigger::attach(
            key,
            TooltipOptions::new(text).show_on_click(true),
            Capabilities::default(),
        )
    }

    #[test]
    fn hover_enter_shows_after_delay_and_leave_hides() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");

        binding.pointer_enter(&mut ctrl, info(), 0);
        assert!(!ctrl.state().visible);
        ctrl.advance(500);
        assert!(ctrl.state().visible);
        assert_eq!(ctrl.current_target(), Some(1));

        binding.pointer_leave(&mut ctrl, 1_000);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());
    }

    #[test]
    fn focus_and_blur_mirror_hover() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");

        binding.focus(&mut ctrl, info(), 0);
        ctrl.advance(500);
        assert!(ctrl.state().visible);

        binding.blur(&mut ctrl, 1_000);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());
    }

    #[test]
    fn leave_from_a_former_owner_changes_nothing() {
        let mut ctrl = ctrl();
        let mut first = hover_binding(1, "A");
        let mut second = hover_binding(2, "B");

        first.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(500);
        assert_eq!(ctrl.current_target(), Some(1));

        // The tooltip moves on to the second target (cross-fading, since the
        // content changed).
        let moved = TargetInfo::new(info().rect + Vec2::new(50.0, 0.0));
        second.pointer_enter(&mut ctrl, moved, 600);
        ctrl.advance(1_300);
        assert_eq!(ctrl.current_target(), Some(2));

        // A straggling leave from the first target must not hide it.
        first.pointer_leave(&mut ctrl, 1_400);
        ctrl.advance(20_000);
        assert!(ctrl.state().visible);
        assert_eq!(ctrl.current_target(), Some(2));
    }

    #[test]
    fn leave_cancels_own_pending_show() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        ctrl.subscribe(move |state| sink.borrow_mut().push(state.visible));

        binding.pointer_enter(&mut ctrl, info(), 0);
        binding.pointer_leave(&mut ctrl, 100);
        binding.pointer_enter(&mut ctrl, info(), 150);
        binding.pointer_leave(&mut ctrl, 200);
        ctrl.advance(20_000);

        assert!(ctrl.state().is_fully_hidden());
        assert!(
            log.borrow().iter().all(|visible| !visible),
            "rapid enter/leave must never flicker a visible state"
        );
        assert_eq!(ctrl.next_deadline(), None);
    }

    #[test]
    fn touch_device_binding_is_inert() {
        let mut ctrl = ctrl();
        let mut binding: Bind =
            Trigger::attach(1, TooltipOptions::new("A"), Capabilities { hover: false });
        assert!(binding.is_inert());

        binding.pointer_enter(&mut ctrl, info(), 0);
        binding.click(&mut ctrl, info(), 0);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());
    }

    #[test]
    fn touch_opt_out_keeps_the_binding_live() {
        let mut ctrl = ctrl();
        let mut binding: Bind = Trigger::attach(
            1,
            TooltipOptions::new("A").disable_on_touch(false),
            Capabilities { hover: false },
        );
        assert!(!binding.is_inert());

        binding.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(500);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn click_mode_shows_immediately_and_watches() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");

        binding.click(&mut ctrl, info(), 0);
        assert!(ctrl.state().visible, "click shows with no delay");
        assert!(binding.wants_document_clicks());
    }

    #[test]
    fn click_mode_ignores_hover() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");

        binding.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());

        binding.pointer_leave(&mut ctrl, 20_000);
        assert_eq!(ctrl.next_deadline(), None);
    }

    #[test]
    fn second_click_does_not_toggle() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");

        binding.click(&mut ctrl, info(), 0);
        binding.click(&mut ctrl, info(), 100);
        ctrl.advance(10_000);

        assert!(ctrl.state().visible, "re-clicking must not close");
        assert!(binding.wants_document_clicks());
    }

    #[test]
    fn reclick_after_auto_hide_starts_a_fresh_cycle() {
        let mut ctrl = ctrl();
        let mut binding: Bind = Trigger::attach(
            1,
            TooltipOptions::new("A").show_on_click(true).auto_hide_after(300),
            Capabilities::default(),
        );

        binding.click(&mut ctrl, info(), 0);
        assert!(ctrl.state().visible);
        ctrl.advance(2_000); // the auto-hide runs to completion
        assert!(ctrl.state().is_fully_hidden());

        binding.click(&mut ctrl, info(), 3_000);
        assert!(ctrl.state().visible, "re-click after auto-hide must reopen");
        assert!(binding.wants_document_clicks());
    }

    #[test]
    fn reclick_after_explicit_hide_reopens() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");

        binding.click(&mut ctrl, info(), 0);
        ctrl.hide(100); // host-initiated close, not via the binding
        ctrl.advance(1_000);
        assert!(ctrl.state().is_fully_hidden());

        binding.click(&mut ctrl, info(), 2_000);
        assert!(ctrl.state().visible, "re-click after a host hide must reopen");
    }

    #[test]
    fn outside_click_hides_and_stops_watching() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");
        binding.click(&mut ctrl, info(), 0);

        binding.document_click(&mut ctrl, Point::new(10.0, 10.0), 100);
        assert!(!binding.wants_document_clicks());
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());
    }

    #[test]
    fn clicks_inside_target_or_tooltip_keep_it_open() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");
        binding.click(&mut ctrl, info(), 0);

        // Inside the target rectangle.
        binding.document_click(&mut ctrl, Point::new(500.0, 370.0), 100);
        assert!(binding.wants_document_clicks());

        // Inside the rendered tooltip.
        let inside = ctrl.state().position + Vec2::new(5.0, 5.0);
        binding.document_click(&mut ctrl, inside, 200);
        assert!(binding.wants_document_clicks());

        ctrl.advance(10_000);
        assert!(ctrl.state().visible);
    }

    #[test]
    fn stale_watch_clears_without_hiding() {
        let mut ctrl = ctrl();
        let mut binding = click_binding(1, "A");
        binding.click(&mut ctrl, info(), 0);

        // Another target takes the tooltip over (the cross-fade has to
        // finish before the key swaps).
        let mut other = hover_binding(2, "B");
        other.pointer_enter(&mut ctrl, TargetInfo::new(info().rect + Vec2::new(50.0, 0.0)), 100);
        ctrl.advance(800);
        assert_eq!(ctrl.current_target(), Some(2));

        binding.document_click(&mut ctrl, Point::new(10.0, 10.0), 900);
        assert!(!binding.wants_document_clicks());
        ctrl.advance(10_000);
        assert!(ctrl.state().visible, "a stale watch must not hide the new owner");
    }

    #[test]
    fn dispose_while_owner_hides_immediately() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");
        binding.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(500);
        assert!(ctrl.state().visible);

        binding.dispose(&mut ctrl);
        assert!(ctrl.state().is_fully_hidden(), "no transition on teardown");
        assert_eq!(ctrl.next_deadline(), None, "zero pending timers");

        binding.pointer_enter(&mut ctrl, info(), 1_000);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden(), "disposed bindings stay dead");
    }

    #[test]
    fn dispose_while_pending_cancels_the_show() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");
        binding.pointer_enter(&mut ctrl, info(), 0);

        binding.dispose(&mut ctrl);
        ctrl.advance(10_000);
        assert!(ctrl.state().is_fully_hidden());
        assert_eq!(ctrl.next_deadline(), None);
    }

    #[test]
    fn dispose_of_a_non_owner_leaves_the_tooltip_alone() {
        let mut ctrl = ctrl();
        let mut owner = hover_binding(1, "A");
        let mut other = hover_binding(2, "B");

        owner.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(500);

        other.dispose(&mut ctrl);
        assert!(ctrl.state().visible);
        assert_eq!(ctrl.current_target(), Some(1));
    }

    #[test]
    fn update_swaps_options_for_the_next_show() {
        let mut ctrl = ctrl();
        let mut binding = hover_binding(1, "A");

        binding.pointer_enter(&mut ctrl, info(), 0);
        ctrl.advance(500);

        binding.update(TooltipOptions::new("B"));
        binding.pointer_enter(&mut ctrl, info(), 1_000);
        ctrl.advance(10_000);
        assert_eq!(
            ctrl.state().content,
            Some(canopy_lifecycle::Content::Text("B".into()))
        );
    }
}
