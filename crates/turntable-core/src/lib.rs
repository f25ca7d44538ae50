//! Platform-free engine for a 360° product photo viewer.
//!
//! A [`Viewer`] steps through a [`FrameSequence`] either 1:1 with pointer
//! drags or from a self-rescheduling [`Timer`], easing its per-step interval
//! back to a resting speed after a fling. Paint output is pluggable through
//! [`Renderer`]; the web front-end provides canvas and CSS sprite-sheet
//! implementations.

pub mod config;
pub mod constants;
pub mod error;
pub mod frames;
pub mod input;
pub mod interval;
pub mod layout;
pub mod render;
pub mod state;
pub mod timer;
pub mod viewer;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use frames::*;
pub use input::*;
pub use interval::*;
pub use layout::*;
pub use render::*;
pub use state::*;
pub use timer::*;
pub use viewer::*;
