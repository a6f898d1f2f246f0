//! Sprite-sheet definition files.
//!
//! A sheet file names an image, the grid to slice it with, and the named
//! sequences to build over the resulting clips:
//!
//! ```json
//! {
//!   "version": "0.1",
//!   "image": "crayola.bmp",
//!   "clip_width": 16,
//!   "clip_height": 16,
//!   "sequences": { "walk": { "from": 0, "to": -1, "speed": 7.0 } }
//! }
//! ```
//!
//! `image` is resolved against the directory containing the sheet file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{GogolError, Result};
use crate::image::{ImageCache, ImageDecoder};
use crate::sequence::{Sequence, DEFAULT_SPEED};
use crate::sprite::Sprite;

const SUPPORTED_VERSION: &str = "0.1";

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDef {
    pub from: isize,
    pub to: isize,
    pub speed: f64,
}

#[derive(Debug, Clone)]
pub struct SheetFile {
    pub version: String,
    pub image: PathBuf,
    pub clip_width: u32,
    pub clip_height: u32,
    pub sequences: BTreeMap<String, SequenceDef>,
}

/// A loaded sheet: the sliced sprite and one stopped sequence per definition.
#[derive(Debug)]
pub struct Sheet {
    pub sprite: Arc<Sprite>,
    pub sequences: BTreeMap<String, Sequence>,
}

impl SheetFile {
    pub fn build<D: ImageDecoder>(&self, cache: &mut ImageCache<D>) -> Result<Sheet> {
        let image = cache.load(&self.image)?;
        let sprite = Arc::new(Sprite::new(image, self.clip_width, self.clip_height)?);
        let mut sequences = BTreeMap::new();
        for (name, def) in &self.sequences {
            let sequence = sprite.sequence(def.from, def.to)?.with_speed(def.speed);
            sequences.insert(name.clone(), sequence);
        }
        Ok(Sheet { sprite, sequences })
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct SheetFileJson {
    version: String,
    image: String,
    clip_width: u32,
    clip_height: u32,
    sequences: BTreeMap<String, SequenceDefJson>,
}

#[derive(Debug, Deserialize)]
struct SequenceDefJson {
    #[serde(default)]
    from: isize,
    #[serde(default = "default_to")]
    to: isize,
    #[serde(default = "default_speed")]
    speed: f64,
}

fn default_to() -> isize {
    -1
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

pub fn load_sheet_file(path: &Path) -> Result<SheetFile> {
    let sheet_error = |reason: String| GogolError::Sheet {
        path: path.to_path_buf(),
        reason,
    };
    let raw = fs::read_to_string(path).map_err(|e| sheet_error(format!("read failed: {e}")))?;
    let json: SheetFileJson =
        serde_json::from_str(&raw).map_err(|e| sheet_error(format!("parse failed: {e}")))?;
    validate_sheet_json(&json).map_err(sheet_error)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let sequences = json
        .sequences
        .into_iter()
        .map(|(name, def)| {
            (
                name,
                SequenceDef {
                    from: def.from,
                    to: def.to,
                    speed: def.speed,
                },
            )
        })
        .collect();

    Ok(SheetFile {
        version: json.version,
        image: base.join(json.image),
        clip_width: json.clip_width,
        clip_height: json.clip_height,
        sequences,
    })
}

fn validate_sheet_json(json: &SheetFileJson) -> std::result::Result<(), String> {
    if json.version != SUPPORTED_VERSION {
        return Err(format!("unsupported version '{}'", json.version));
    }
    if json.image.is_empty() {
        return Err("image path is empty".to_string());
    }
    if json.clip_width == 0 || json.clip_height == 0 {
        return Err("clip_width/clip_height must be > 0".to_string());
    }
    if json.sequences.is_empty() {
        return Err("no sequences defined".to_string());
    }
    for (name, def) in &json.sequences {
        if name.is_empty() {
            return Err("sequence with empty name".to_string());
        }
        if !def.speed.is_finite() {
            return Err(format!("sequence '{}' has non-finite speed", name));
        }
    }
    Ok(())
}
