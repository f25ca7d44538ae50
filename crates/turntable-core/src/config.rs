use crate::constants::{
    DEFAULT_CONTAINER_SELECTOR, DEFAULT_INTERVAL_MS, DEFAULT_LOADER_URL,
    DEFAULT_PREVIEW_OVERLAY_URL, DEFAULT_SLIDER_SELECTOR, DEFAULT_SPRITE_FRAME_COUNT,
    MIN_INTERVAL_MS,
};
use crate::error::ConfigError;
use crate::frames::FrameSource;
use crate::state::Direction;
use serde::Deserialize;

/// Which paint strategy the viewer uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderMode {
    /// Discrete images drawn on a canvas.
    #[default]
    Frames,
    /// One sprite sheet shown through a CSS background offset.
    Sprite {
        url: String,
        #[serde(rename = "frameCount", default = "default_frame_count")]
        frame_count: usize,
    },
}

fn default_frame_count() -> usize {
    DEFAULT_SPRITE_FRAME_COUNT
}

/// Construction-time settings. Field names follow the JS options object.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub frames: Vec<String>,
    pub interval_default: u32,
    pub direction: Direction,
    pub mouse_handling: bool,
    pub mode: RenderMode,
    pub container: String,
    pub preview: Option<String>,
    pub slider: String,
    pub loader_url: String,
    pub preview_overlay_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            interval_default: DEFAULT_INTERVAL_MS,
            direction: Direction::Forward,
            mouse_handling: true,
            mode: RenderMode::Frames,
            container: DEFAULT_CONTAINER_SELECTOR.to_string(),
            preview: None,
            slider: DEFAULT_SLIDER_SELECTOR.to_string(),
            loader_url: DEFAULT_LOADER_URL.to_string(),
            preview_overlay_url: DEFAULT_PREVIEW_OVERLAY_URL.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn with_frames(frames: Vec<String>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.mode {
            RenderMode::Frames => {
                if self.frames.is_empty() {
                    return Err(ConfigError::NoFrames);
                }
                if let Some(i) = self.frames.iter().position(|f| f.trim().is_empty()) {
                    return Err(ConfigError::EmptyLocator(i));
                }
            }
            RenderMode::Sprite { url, frame_count } => {
                if url.trim().is_empty() {
                    return Err(ConfigError::EmptySpriteUrl);
                }
                if *frame_count == 0 {
                    return Err(ConfigError::ZeroFrameCount);
                }
            }
        }
        Ok(())
    }

    /// Default interval with the floor applied.
    pub fn effective_interval(&self) -> u32 {
        self.interval_default.max(MIN_INTERVAL_MS)
    }

    pub fn frame_source(&self) -> FrameSource {
        match &self.mode {
            RenderMode::Frames => FrameSource::Frames(self.frames.clone()),
            RenderMode::Sprite { url, frame_count } => FrameSource::Sheet {
                url: url.clone(),
                frame_count: *frame_count,
            },
        }
    }

    /// First frame locator, used for the preview thumbnail.
    pub fn first_frame(&self) -> Option<&str> {
        match &self.mode {
            RenderMode::Frames => self.frames.first().map(String::as_str),
            RenderMode::Sprite { url, .. } => Some(url.as_str()),
        }
    }
}
