//! The animation loop: one state machine driving frames from either pointer
//! drags or a self-rescheduling timer.
//!
//! Every transition out of `Running`, and every new drag, cancels the pending
//! tick before anything else happens, so at most one tick is ever scheduled
//! and drag steps never interleave with timer steps.

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::frames::FrameSequence;
use crate::input::{DragGesture, InputTracker};
use crate::interval::IntervalController;
use crate::render::{FrameView, Renderer, Viewport};
use crate::state::{AnimationState, Direction, LoopPhase};
use crate::timer::Timer;

/// Result of [`Viewer::show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Frames were ready and the loop is running.
    Started,
    /// Resources still need loading; the loop starts once they settle.
    NeedsPreload,
    /// Nothing can be shown: no frames, or every resource failed.
    Unavailable,
}

pub struct Viewer<R: Renderer, T: Timer> {
    frames: FrameSequence<R::Image>,
    renderer: R,
    timer: T,
    state: AnimationState<T::Handle>,
    interval: IntervalController,
    tracker: InputTracker,
    /// Phase the drag started from; decides what a plain click does.
    phase_before_drag: LoopPhase,
    drag_enabled: bool,
    visible: bool,
    viewport: Viewport,
}

impl<R: Renderer, T: Timer> Viewer<R, T> {
    pub fn new(config: &ViewerConfig, renderer: R, timer: T) -> Self {
        Self::from_parts(
            FrameSequence::new(config.frame_source()),
            config.effective_interval(),
            config.direction,
            config.mouse_handling,
            renderer,
            timer,
        )
    }

    pub fn from_parts(
        frames: FrameSequence<R::Image>,
        interval_default_ms: u32,
        direction: Direction,
        drag_enabled: bool,
        renderer: R,
        timer: T,
    ) -> Self {
        Self {
            frames,
            renderer,
            timer,
            state: AnimationState::new(direction),
            interval: IntervalController::new(interval_default_ms),
            tracker: InputTracker::new(),
            phase_before_drag: LoopPhase::Idle,
            drag_enabled,
            visible: false,
            viewport: Viewport::default(),
        }
    }

    pub fn frames(&self) -> &FrameSequence<R::Image> {
        &self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    #[inline]
    pub fn phase(&self) -> LoopPhase {
        self.state.phase
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval.current_ms()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// A tick is scheduled.
    #[inline]
    pub fn has_pending_tick(&self) -> bool {
        self.state.pending.is_some()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ---------------- Lifecycle ----------------

    pub fn show(&mut self, viewport: Viewport) -> ShowOutcome {
        self.visible = true;
        self.viewport = viewport;
        if self.frames.is_ready() {
            self.renderer.resize(viewport);
            if !self.state.is_dragging() {
                self.start();
            }
            return ShowOutcome::Started;
        }
        if self.frames.is_empty() || self.frames.is_settled() {
            log::warn!("[viewer] nothing to show ({} frames)", self.frames.len());
            return ShowOutcome::Unavailable;
        }
        ShowOutcome::NeedsPreload
    }

    pub fn hide(&mut self) {
        self.cancel_pending();
        self.tracker.cancel();
        self.state.phase = LoopPhase::Idle;
        self.visible = false;
        self.renderer.clear();
        log::debug!("[viewer] hidden at frame {}", self.frames.current_index());
    }

    /// Store a decoded resource. Starts the loop once the whole set has
    /// settled while the viewer is visible.
    pub fn resource_loaded(&mut self, index: usize, image: R::Image) {
        if index >= self.frames.resources().len() {
            log::warn!("[viewer] ignoring resource {} (out of range)", index);
            return;
        }
        self.renderer.resource_ready(index, &image);
        self.frames.resource_loaded(index, image);
        self.start_if_settled();
    }

    /// Record a failed resource. The remaining resources keep loading; the
    /// returned error is for the host to report.
    pub fn resource_failed(&mut self, index: usize, reason: impl Into<String>) -> ViewerError {
        let url = self
            .frames
            .resources()
            .get(index)
            .cloned()
            .unwrap_or_default();
        let err = ViewerError::ResourceLoad {
            index,
            url,
            reason: reason.into(),
        };
        log::warn!("[viewer] {}", err);
        if self.frames.resource_failed(index) {
            self.start_if_settled();
        }
        err
    }

    /// A set that settles mid-drag is laid out now and started when the
    /// pointer is released.
    fn start_if_settled(&mut self) {
        if !self.visible || !self.frames.is_ready() {
            return;
        }
        match self.state.phase {
            LoopPhase::Idle => {
                log::info!(
                    "[viewer] {} of {} resources ready ({} failed), starting",
                    self.frames.loaded_count(),
                    self.frames.resources().len(),
                    self.frames.failed_count()
                );
                self.renderer.resize(self.viewport);
                self.start();
            }
            LoopPhase::Dragging if self.phase_before_drag == LoopPhase::Idle => {
                self.renderer.resize(self.viewport);
            }
            _ => {}
        }
    }

    // ---------------- Loop ----------------

    /// Begin autonomous rotation from the current interval. Any pending tick
    /// is cancelled first. Does nothing but settle in `Idle` if frames are
    /// not ready.
    pub fn start(&mut self) {
        self.cancel_pending();
        if !self.frames.is_ready() {
            self.state.phase = LoopPhase::Idle;
            return;
        }
        self.state.phase = LoopPhase::Running;
        self.step_and_schedule();
    }

    /// Stop autonomous rotation. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.state.phase == LoopPhase::Running {
            self.state.phase = LoopPhase::Idle;
        }
    }

    /// Timer callback: the scheduled delay elapsed.
    pub fn tick(&mut self) {
        // The handle that brought us here is spent.
        self.state.pending = None;
        if self.state.phase != LoopPhase::Running {
            self.state.running = false;
            return;
        }
        self.step_and_schedule();
    }

    fn step_and_schedule(&mut self) {
        self.render_current();
        self.frames.advance(self.state.direction);
        let delay = self.interval.decay();
        self.state.pending = Some(self.timer.schedule(delay));
        self.state.running = true;
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.state.pending.take() {
            self.timer.cancel(handle);
        }
        self.state.running = false;
    }

    fn render_current(&mut self) {
        let index = self.frames.current_index();
        self.renderer.render(FrameView {
            index,
            image: self.frames.current_image(),
        });
    }

    // ---------------- Input ----------------

    pub fn pointer_down(&mut self, x: f64, t_ms: f64) {
        if !self.drag_enabled {
            return;
        }
        self.cancel_pending();
        if self.state.phase != LoopPhase::Dragging {
            self.phase_before_drag = self.state.phase;
        }
        self.tracker.pointer_down(x, t_ms);
        self.state.phase = LoopPhase::Dragging;
        log::debug!("[mouse] drag start x={:.1} from {:?}", x, self.phase_before_drag);
    }

    /// Follow the cursor: one frame per move event.
    pub fn pointer_move(&mut self, x: f64) {
        if self.state.phase != LoopPhase::Dragging {
            return;
        }
        self.state.direction = self.tracker.pointer_move(x, self.state.direction);
        if self.frames.is_ready() {
            self.render_current();
            self.frames.advance(self.state.direction);
        }
    }

    /// Finish the drag. A drag with movement restarts the loop at a speed
    /// derived from the gesture; a plain click pauses a running loop and
    /// resumes a paused one.
    pub fn pointer_up(&mut self, x: f64, t_ms: f64) -> Option<DragGesture> {
        if self.state.phase != LoopPhase::Dragging {
            return None;
        }
        let gesture = self.tracker.pointer_up(x, t_ms)?;
        if gesture.is_click() {
            match self.phase_before_drag {
                LoopPhase::Running => {
                    self.state.phase = LoopPhase::Paused;
                    log::debug!("[mouse] click: paused");
                }
                LoopPhase::Paused => {
                    log::debug!("[mouse] click: resumed");
                    self.start();
                }
                LoopPhase::Idle | LoopPhase::Dragging => {
                    if self.visible && self.frames.is_ready() {
                        // Preloading finished while the pointer was down.
                        self.start();
                    } else {
                        self.state.phase = LoopPhase::Idle;
                    }
                }
            }
        } else {
            let interval = self
                .interval
                .set_from_drag(gesture.distance, gesture.duration_ms);
            log::debug!(
                "[mouse] drag end: {:.0}px in {:.0}ms -> {}ms",
                gesture.distance,
                gesture.duration_ms,
                interval
            );
            if self.visible {
                self.start();
            } else {
                self.state.phase = LoopPhase::Idle;
            }
        }
        Some(gesture)
    }

    /// The host took the pointer away mid-gesture (a touch pan, say). A drag
    /// that moved ends as if released at its last sample; a bare press puts
    /// back the phase it interrupted.
    pub fn pointer_cancel(&mut self, t_ms: f64) {
        if self.state.phase != LoopPhase::Dragging {
            return;
        }
        if self.tracker.moved() {
            let x = self.tracker.last_x();
            self.pointer_up(x, t_ms);
            return;
        }
        self.tracker.cancel();
        log::debug!("[mouse] drag cancelled from {:?}", self.phase_before_drag);
        match self.phase_before_drag {
            LoopPhase::Paused => self.state.phase = LoopPhase::Paused,
            _ if self.visible => self.start(),
            _ => self.state.phase = LoopPhase::Idle,
        }
    }

    /// Viewport changed: drop the pending tick, re-layout, and resume. An
    /// active drag survives; only its scheduling is reset.
    pub fn resize(&mut self, viewport: Viewport) {
        self.cancel_pending();
        self.viewport = viewport;
        self.renderer.resize(viewport);
        if self.state.is_dragging() {
            return;
        }
        if self.visible {
            self.start();
        } else {
            self.state.phase = LoopPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<usize>,
        resized: usize,
        cleared: usize,
    }

    impl Renderer for Recorder {
        type Image = ();
        fn resize(&mut self, _viewport: Viewport) {
            self.resized += 1;
        }
        fn render(&mut self, frame: FrameView<'_, ()>) {
            self.drawn.push(frame.index);
        }
        fn clear(&mut self) {
            self.cleared += 1;
        }
    }

    fn ready_viewer(n: usize, default_ms: u32) -> Viewer<Recorder, ManualTimer> {
        let frames = (0..n).map(|i| format!("/f{i}.jpg")).collect();
        let mut v = Viewer::from_parts(
            FrameSequence::from_frames(frames),
            default_ms,
            Direction::Forward,
            true,
            Recorder::default(),
            ManualTimer::new(),
        );
        for i in 0..n {
            v.resource_loaded(i, ());
        }
        v
    }

    fn fire(v: &mut Viewer<Recorder, ManualTimer>) -> Option<u32> {
        let delay = v.timer_mut().fire()?;
        v.tick();
        Some(delay)
    }

    #[test]
    fn show_starts_immediately_when_ready() {
        let mut v = ready_viewer(3, 100);
        assert_eq!(v.show(Viewport::new(300.0, 200.0)), ShowOutcome::Started);
        assert_eq!(v.phase(), LoopPhase::Running);
        assert_eq!(v.renderer().drawn, vec![0]);
        assert_eq!(v.timer().pending_count(), 1);
    }

    #[test]
    fn show_before_load_waits_for_all_resources() {
        let mut v = Viewer::from_parts(
            FrameSequence::from_frames(vec!["/a".into(), "/b".into()]),
            100,
            Direction::Forward,
            true,
            Recorder::default(),
            ManualTimer::new(),
        );
        assert_eq!(v.show(Viewport::new(10.0, 10.0)), ShowOutcome::NeedsPreload);
        v.resource_loaded(1, ());
        assert!(!v.is_running());
        let err = v.resource_failed(0, "404");
        assert!(matches!(err, ViewerError::ResourceLoad { index: 0, .. }));
        assert!(v.is_running());
        // frame 0 failed; the renderer still gets asked for it
        assert_eq!(v.renderer().drawn, vec![0]);
    }

    #[test]
    fn empty_viewer_never_starts() {
        let mut v = ready_viewer(0, 100);
        assert_eq!(v.show(Viewport::default()), ShowOutcome::Unavailable);
        v.start();
        assert!(!v.is_running());
        assert_eq!(v.timer().pending_count(), 0);
    }

    #[test]
    fn ticks_advance_and_reschedule() {
        let mut v = ready_viewer(3, 100);
        v.show(Viewport::default());
        fire(&mut v);
        fire(&mut v);
        assert_eq!(v.renderer().drawn, vec![0, 1, 2]);
        assert_eq!(v.timer().pending_count(), 1);
    }

    #[test]
    fn stale_tick_after_stop_does_nothing() {
        let mut v = ready_viewer(3, 100);
        v.show(Viewport::default());
        v.stop();
        v.tick();
        assert_eq!(v.renderer().drawn, vec![0]);
        assert!(!v.is_running());
    }

    #[test]
    fn hide_cancels_and_clears() {
        let mut v = ready_viewer(3, 100);
        v.show(Viewport::default());
        v.hide();
        assert_eq!(v.timer().pending_count(), 0);
        assert_eq!(v.phase(), LoopPhase::Idle);
        assert_eq!(v.renderer().cleared, 1);
        assert!(!v.is_visible());
    }

    #[test]
    fn drag_disabled_ignores_pointer() {
        let mut v = Viewer::from_parts(
            FrameSequence::<()>::from_frames(vec!["/a".into()]),
            100,
            Direction::Forward,
            false,
            Recorder::default(),
            ManualTimer::new(),
        );
        v.resource_loaded(0, ());
        v.show(Viewport::default());
        v.pointer_down(0.0, 0.0);
        assert_eq!(v.phase(), LoopPhase::Running);
        assert!(v.pointer_up(10.0, 10.0).is_none());
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut v = ready_viewer(3, 100);
        v.show(Viewport::default());
        v.pointer_move(50.0);
        assert_eq!(v.renderer().drawn, vec![0]);
    }

    #[test]
    fn release_while_hidden_stays_idle() {
        let mut v = ready_viewer(3, 100);
        v.show(Viewport::default());
        v.pointer_down(0.0, 0.0);
        v.hide();
        assert!(v.pointer_up(40.0, 10.0).is_none());
        assert_eq!(v.phase(), LoopPhase::Idle);
        assert_eq!(v.timer().pending_count(), 0);
    }
}
