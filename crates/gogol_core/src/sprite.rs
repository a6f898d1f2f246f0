//! Grid partition of an image into equally sized clips.
//!
//! Clips are laid out left-to-right, then top-to-bottom, starting at the
//! image origin. Tiles that would cross the right or bottom edge are dropped,
//! so `clips[i]` is always grid cell `(i % columns, i / columns)`.

use std::sync::Arc;

use glam::Vec2;

use crate::clip::Clip;
use crate::error::{GogolError, Result};
use crate::host::RenderHost;
use crate::image::Image;
use crate::sequence::Sequence;

#[derive(Debug, Clone)]
pub struct Sprite {
    image: Arc<Image>,
    clip_width: u32,
    clip_height: u32,
    columns: u32,
    clips: Vec<Clip>,
}

impl Sprite {
    pub fn new(image: Arc<Image>, clip_width: u32, clip_height: u32) -> Result<Self> {
        if clip_width == 0 || clip_height == 0 {
            return Err(GogolError::InvalidGeometry {
                clip_width,
                clip_height,
            });
        }

        let columns = image.width() / clip_width;
        let rows = image.height() / clip_height;
        let mut clips = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for column in 0..columns {
                clips.push(Clip::new(
                    Arc::clone(&image),
                    column * clip_width,
                    row * clip_height,
                    clip_width,
                    clip_height,
                ));
            }
        }

        log::debug!(
            "Sliced '{}' into {} clips of {}x{}",
            image.path().display(),
            clips.len(),
            clip_width,
            clip_height
        );

        Ok(Self {
            image,
            clip_width,
            clip_height,
            columns,
            clips,
        })
    }

    pub fn image(&self) -> &Arc<Image> {
        &self.image
    }

    pub fn clip_size(&self) -> (u32, u32) {
        (self.clip_width, self.clip_height)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clip(&self, index: usize) -> Result<&Clip> {
        self.clips.get(index).ok_or(GogolError::IndexOutOfRange {
            index: index as isize,
            len: self.clips.len(),
        })
    }

    pub fn draw_clip_at(&self, index: usize, host: &mut dyn RenderHost, pos: Vec2) -> Result<()> {
        self.clip(index)?.draw_at(host, pos);
        Ok(())
    }

    /// Build a sequence over `[from, to]`; negative indices count from the end.
    pub fn sequence(self: &Arc<Self>, from: isize, to: isize) -> Result<Sequence> {
        Sequence::new(Arc::clone(self), from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Rect;
    use crate::test_support::{blank_image, RecordingHost};

    #[test]
    fn even_grid_produces_every_cell() {
        let sprite = Sprite::new(blank_image("even.png", 64, 48), 16, 16).unwrap();
        assert_eq!(sprite.len(), 4 * 3);
        assert_eq!(sprite.columns(), 4);
    }

    #[test]
    fn tiling_order_is_row_major() {
        let sprite = Sprite::new(blank_image("order.png", 48, 32), 16, 16).unwrap();
        let cols = sprite.columns() as usize;

        assert_eq!(sprite.clips()[0].region(), Rect::new(0, 0, 16, 16));
        assert_eq!(
            sprite.clips()[cols - 1].region(),
            Rect::new((cols as u32 - 1) * 16, 0, 16, 16)
        );
        assert_eq!(sprite.clips()[cols].region(), Rect::new(0, 16, 16, 16));

        for (i, clip) in sprite.clips().iter().enumerate() {
            let region = clip.region();
            assert_eq!(region.x, (i % cols) as u32 * 16);
            assert_eq!(region.y, (i / cols) as u32 * 16);
        }
    }

    #[test]
    fn partial_edge_tiles_are_dropped() {
        let sprite = Sprite::new(blank_image("ragged.png", 50, 35), 16, 16).unwrap();
        assert_eq!(sprite.columns(), 3);
        assert_eq!(sprite.len(), 3 * 2);
        let last = sprite.clips().last().unwrap().region();
        assert!(last.right() <= 50);
        assert!(last.bottom() <= 35);
    }

    #[test]
    fn clip_larger_than_image_yields_no_clips() {
        let sprite = Sprite::new(blank_image("small.png", 8, 8), 16, 16).unwrap();
        assert!(sprite.is_empty());
    }

    #[test]
    fn zero_clip_dimension_is_invalid_geometry() {
        let err = Sprite::new(blank_image("zero.png", 16, 16), 0, 16).unwrap_err();
        assert!(matches!(
            err,
            GogolError::InvalidGeometry {
                clip_width: 0,
                clip_height: 16
            }
        ));
        assert!(Sprite::new(blank_image("zero.png", 16, 16), 16, 0).is_err());
    }

    #[test]
    fn draw_clip_at_forwards_to_clip() {
        let sprite = Sprite::new(blank_image("draw.png", 32, 16), 16, 16).unwrap();
        let mut host = RecordingHost::default();
        sprite
            .draw_clip_at(1, &mut host, Vec2::new(5.0, 6.0))
            .expect("index 1 is valid");

        assert_eq!(host.draws[0].src, Rect::new(16, 0, 16, 16));
        assert_eq!(host.draws[0].dst, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn draw_clip_past_end_is_index_out_of_range() {
        let sprite = Sprite::new(blank_image("oob.png", 32, 16), 16, 16).unwrap();
        let mut host = RecordingHost::default();
        let err = sprite
            .draw_clip_at(sprite.len(), &mut host, Vec2::ZERO)
            .unwrap_err();
        assert!(matches!(err, GogolError::IndexOutOfRange { index: 2, len: 2 }));
        assert!(host.draws.is_empty());
    }
}
