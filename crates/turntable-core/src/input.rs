use crate::state::Direction;

/// Summary of a finished drag, handed to the interval model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    pub distance: f64,
    pub duration_ms: f64,
    /// At least one pointer move changed the position during the drag.
    pub moved: bool,
}

impl DragGesture {
    /// A press and release without movement.
    #[inline]
    pub fn is_click(&self) -> bool {
        !self.moved && self.distance == 0.0
    }
}

/// Samples pointer positions across one drag gesture.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputTracker {
    last_x: f64,
    drag_start_x: f64,
    drag_start_ms: f64,
    drag_in_progress: bool,
    moved: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f64, t_ms: f64) {
        self.last_x = x;
        self.drag_start_x = x;
        self.drag_start_ms = t_ms;
        self.drag_in_progress = true;
        self.moved = false;
    }

    /// Resolve the direction relative to the previous sample, not the drag
    /// start, then remember `x`.
    pub fn pointer_move(&mut self, x: f64, current: Direction) -> Direction {
        let direction = Direction::infer(self.last_x, x, current);
        if x != self.last_x {
            self.moved = true;
        }
        self.last_x = x;
        direction
    }

    /// Close the gesture. Returns `None` if no drag was in progress.
    pub fn pointer_up(&mut self, x: f64, t_ms: f64) -> Option<DragGesture> {
        if !self.drag_in_progress {
            return None;
        }
        self.drag_in_progress = false;
        let gesture = DragGesture {
            distance: (self.drag_start_x - x).abs(),
            duration_ms: (t_ms - self.drag_start_ms).max(1.0),
            moved: self.moved,
        };
        self.drag_start_x = x;
        self.last_x = x;
        Some(gesture)
    }

    /// Drop an in-flight drag without producing a gesture.
    pub fn cancel(&mut self) {
        self.drag_in_progress = false;
        self.moved = false;
    }

    #[inline]
    pub fn drag_in_progress(&self) -> bool {
        self.drag_in_progress
    }

    #[inline]
    pub fn moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn last_x(&self) -> f64 {
        self.last_x
    }

    #[inline]
    pub fn drag_start_x(&self) -> f64 {
        self.drag_start_x
    }

    #[inline]
    pub fn drag_start_ms(&self) -> f64 {
        self.drag_start_ms
    }
}
