// Timing and drag tuning shared by every front-end.

// Interval bounds (milliseconds per frame step)
pub const MIN_INTERVAL_MS: u32 = 5; // fastest spin after a hard fling
pub const DEFAULT_INTERVAL_MS: u32 = 200; // resting spin speed for discrete frames

// Interval decay steps; coarse while far below the default, fine near it
pub const DECAY_STEP_COARSE_MS: u32 = 5;
pub const DECAY_STEP_FINE_MS: u32 = 10;
pub const DECAY_COARSE_DIVISOR: f64 = 3.0; // coarse steps apply below default / 3

// Drag speed mapping: raw = round(distance * GAIN / duration * SCALE * DAMPING)
pub const DRAG_SPEED_GAIN: f64 = 6.5;
pub const DRAG_SPEED_SCALE: f64 = 100.0;
pub const DRAG_SPEED_DAMPING: f64 = 0.3;
pub const MIN_DRAG_DURATION_MS: f64 = 1.0; // guards the division for zero-length drags

// Sprite sheet defaults
pub const DEFAULT_SPRITE_FRAME_COUNT: usize = 36;

// Host defaults
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".j-360-photo";
pub const DEFAULT_SLIDER_SELECTOR: &str = ".product-description__slider-item";
pub const DEFAULT_LOADER_URL: &str = "/images/loader.gif";
pub const DEFAULT_PREVIEW_OVERLAY_URL: &str = "/images/transparent30.png";
