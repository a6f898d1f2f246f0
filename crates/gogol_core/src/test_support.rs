use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use crate::clip::Rect;
use crate::error::{GogolError, Result};
use crate::host::RenderHost;
use crate::image::{DecodedImage, Image, ImageDecoder};

pub fn temp_file_path(name_hint: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "gogol_test_{}_{}_{}.{}",
        name_hint,
        std::process::id(),
        nanos,
        extension
    ))
}

pub fn blank_image(path: &str, width: u32, height: u32) -> Arc<Image> {
    let pixels = vec![0; width as usize * height as usize * 4];
    Arc::new(Image::from_rgba8(path, width, height, pixels).expect("valid buffer"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub image_path: PathBuf,
    pub image_size: (u32, u32),
    pub src: Rect,
    pub dst: Vec2,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub draws: Vec<RecordedDraw>,
}

impl RenderHost for RecordingHost {
    fn draw_region(&mut self, image: &Image, src: Rect, dst: Vec2) {
        self.draws.push(RecordedDraw {
            image_path: image.path().to_path_buf(),
            image_size: image.size(),
            src,
            dst,
        });
    }
}

/// Produces blank images of a fixed size and counts decode calls. Paths
/// starting with "missing" fail.
pub struct CountingDecoder {
    width: u32,
    height: u32,
    calls: Cell<usize>,
}

impl CountingDecoder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ImageDecoder for CountingDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        self.calls.set(self.calls.get() + 1);
        if path.to_string_lossy().starts_with("missing") {
            return Err(GogolError::Decode {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }
        Ok(DecodedImage {
            pixels: vec![0; self.width as usize * self.height as usize * 4],
            width: self.width,
            height: self.height,
        })
    }
}
