use std::sync::Arc;

use glam::Vec2;

use crate::host::RenderHost;
use crate::image::Image;

/// Axis-aligned rectangle in image pixel space, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// A rectangular region of an image. Regions are not checked against the
/// image bounds.
#[derive(Debug, Clone)]
pub struct Clip {
    image: Arc<Image>,
    region: Rect,
}

impl Clip {
    pub fn new(image: Arc<Image>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            image,
            region: Rect::new(x, y, width, height),
        }
    }

    pub fn image(&self) -> &Arc<Image> {
        &self.image
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn draw_at(&self, host: &mut dyn RenderHost, pos: Vec2) {
        host.draw_region(&self.image, self.region, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{blank_image, RecordingHost};

    #[test]
    fn draw_at_forwards_region_and_image() {
        let image = blank_image("sheet.png", 64, 32);
        let clip = Clip::new(Arc::clone(&image), 16, 8, 16, 16);

        let mut host = RecordingHost::default();
        clip.draw_at(&mut host, Vec2::new(3.0, 4.0));

        assert_eq!(host.draws.len(), 1);
        let draw = &host.draws[0];
        assert_eq!(draw.image_path, image.path());
        assert_eq!(draw.image_size, (64, 32));
        assert_eq!(draw.src, Rect::new(16, 8, 16, 16));
        assert_eq!(draw.dst, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn out_of_bounds_region_is_accepted() {
        let image = blank_image("tiny.png", 4, 4);
        let clip = Clip::new(image, 2, 2, 100, 100);
        assert_eq!(clip.region().right(), 102);
        assert_eq!(clip.region().bottom(), 102);
    }
}
