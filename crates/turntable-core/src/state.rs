//! Animation state shared between the loop, the input tracker and renderers.
//!
//! Nothing here touches platform APIs; the web front-end keeps one
//! [`AnimationState`] per viewer instance inside [`crate::Viewer`].

use serde::Deserialize;

/// Rotation direction relative to the viewer.
///
/// `Forward` steps the frame index up and wraps from the last frame to the
/// first; `Backward` steps it down and wraps from the first to the last.
/// The legacy `"left"`/`"right"` names are accepted when deserializing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "left")]
    Forward,
    #[serde(alias = "right")]
    Backward,
}

impl Direction {
    /// Infer a direction from two successive pointer positions.
    ///
    /// Moving left resolves to `Backward`, moving right to `Forward`, and an
    /// unchanged position keeps `current`.
    #[inline]
    pub fn infer(prev_x: f64, next_x: f64, current: Direction) -> Direction {
        if next_x < prev_x {
            Direction::Backward
        } else if next_x > prev_x {
            Direction::Forward
        } else {
            current
        }
    }
}

/// Where the animation loop currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPhase {
    /// Not shown, or shown but frames are not ready yet.
    #[default]
    Idle,
    /// Autonomous, timer-driven rotation.
    Running,
    /// Stopped by a click; the next click resumes.
    Paused,
    /// The user is dragging; frames follow the pointer and no timer is armed.
    Dragging,
}

/// Mutable per-viewer animation state.
///
/// `pending` holds the handle of the single outstanding tick. `running` is
/// true exactly when `pending` is `Some`.
#[derive(Debug)]
pub struct AnimationState<H> {
    pub direction: Direction,
    pub phase: LoopPhase,
    pub running: bool,
    pub pending: Option<H>,
}

impl<H> AnimationState<H> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            phase: LoopPhase::Idle,
            running: false,
            pending: None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.phase == LoopPhase::Dragging
    }
}
