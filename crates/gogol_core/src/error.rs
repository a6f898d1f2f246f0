use std::path::PathBuf;

/// Everything that can go wrong while loading images or building sprites and
/// sequences. None of these are retried; they are meant to be fixed by the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum GogolError {
    /// The image file could not be read, decoded, or is not RGBA.
    #[error("failed to load image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("invalid clip geometry {clip_width}x{clip_height}: both dimensions must be > 0")]
    InvalidGeometry { clip_width: u32, clip_height: u32 },

    #[error("index {index} out of range for {len} clips")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid sequence range: from {from} is past to {to}")]
    InvalidRange { from: usize, to: usize },

    /// A sprite-sheet definition file could not be read or failed validation.
    #[error("sprite sheet {}: {reason}", path.display())]
    Sheet { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, GogolError>;
