//! Sprite-sheet slicing and time-driven animation over an external render
//! host.
//!
//! Build an `Image` through an `ImageCache`, slice it into a `Sprite`, and
//! play a `Sequence` over a range of its clips:
//!
//! ```no_run
//! use std::sync::Arc;
//! use gogol_core::{ImageCache, Sprite};
//!
//! let mut cache = ImageCache::new();
//! let image = cache.load("goblin.png")?;
//! let sprite = Arc::new(Sprite::new(image, 16, 16)?);
//! let mut walk = sprite.sequence(0, -1)?;
//! walk.play(7.0);
//! # Ok::<(), gogol_core::GogolError>(())
//! ```

pub mod clip;
pub mod error;
pub mod handler;
pub mod host;
pub mod image;
pub mod input;
pub mod sequence;
pub mod sheet;
pub mod sprite;
pub mod time;

#[cfg(test)]
mod test_support;

pub use clip::{Clip, Rect};
pub use error::{GogolError, Result};
pub use handler::{Controls, Handler, WindowRequest};
pub use host::{RenderHost, ViewTransform};
pub use self::image::{DecodedImage, FileDecoder, Image, ImageCache, ImageDecoder};
pub use input::{InputState, Key, MouseButton};
pub use sequence::Sequence;
pub use sheet::{load_sheet_file, Sheet, SheetFile};
pub use sprite::Sprite;
pub use time::FrameClock;
