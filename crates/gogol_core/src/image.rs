//! Decoded bitmaps and the path-keyed image cache.
//!
//! An `Image` is immutable once loaded. The `ImageCache` is owned by the host
//! application and handed to whatever needs to load images; loading the same
//! path twice returns the same `Arc<Image>` without decoding again. Entries are
//! never evicted.
//!
//! Only 8-bit RGBA bitmaps are accepted. Anything else the decoder produces is
//! rejected at load time so the render host can upload pixels as-is.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Vec2;

use crate::clip::Rect;
use crate::error::{GogolError, Result};
use crate::host::RenderHost;

/// Raw decoder output: tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Turns a file path into RGBA8 pixels.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage>;
}

/// Decodes PNG and BMP files from disk with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        let decoded = image::open(path).map_err(|e| GogolError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        match decoded {
            image::DynamicImage::ImageRgba8(buffer) => {
                let (width, height) = buffer.dimensions();
                Ok(DecodedImage {
                    pixels: buffer.into_raw(),
                    width,
                    height,
                })
            }
            other => Err(GogolError::Decode {
                path: path.to_path_buf(),
                reason: format!("invalid format {:?}, must be RGBA8", other.color()),
            }),
        }
    }
}

#[derive(Debug)]
pub struct Image {
    path: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap an RGBA8 buffer. The buffer must hold exactly `width * height * 4`
    /// bytes.
    pub fn from_rgba8(
        path: impl Into<PathBuf>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let path = path.into();
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(GogolError::Decode {
                path,
                reason: format!(
                    "pixel buffer holds {} bytes, expected {} for {}x{} RGBA",
                    pixels.len(),
                    expected,
                    width,
                    height
                ),
            });
        }
        Ok(Self {
            path,
            width,
            height,
            pixels,
        })
    }

    /// Source path; also the key render hosts use for the uploaded texture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Draw the whole image with its top-left corner at `pos`.
    pub fn draw_at(&self, host: &mut dyn RenderHost, pos: Vec2) {
        host.draw_region(self, self.bounds(), pos);
    }
}

/// Identity-preserving image cache keyed by path.
pub struct ImageCache<D = FileDecoder> {
    decoder: D,
    images: HashMap<PathBuf, Arc<Image>>,
}

impl ImageCache<FileDecoder> {
    pub fn new() -> Self {
        Self::with_decoder(FileDecoder)
    }
}

impl Default for ImageCache<FileDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ImageDecoder> ImageCache<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            images: HashMap::new(),
        }
    }

    /// Return the cached image for `path`, decoding it on first use. A failed
    /// decode leaves the cache untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Image>> {
        let path = path.as_ref();
        if let Some(image) = self.images.get(path) {
            return Ok(Arc::clone(image));
        }

        let decoded = self.decoder.decode(path)?;
        let image = Arc::new(Image::from_rgba8(
            path,
            decoded.width,
            decoded.height,
            decoded.pixels,
        )?);
        log::debug!(
            "Loaded image '{}' ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        self.images.insert(path.to_path_buf(), Arc::clone(&image));
        Ok(image)
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<Image>> {
        self.images.get(path.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }
}
