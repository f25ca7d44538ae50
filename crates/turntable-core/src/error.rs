use thiserror::Error;

/// Errors surfaced by the engine to its host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    /// A frame resource failed to load or decode. Recoverable: preloading
    /// continues with the remaining resources.
    #[error("failed to load frame resource {index} ({url}): {reason}")]
    ResourceLoad {
        index: usize,
        url: String,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("frame list is empty")]
    NoFrames,
    #[error("frame {0} has an empty locator")]
    EmptyLocator(usize),
    #[error("sprite sheet url is empty")]
    EmptySpriteUrl,
    #[error("sprite frame count must be at least 1")]
    ZeroFrameCount,
}
