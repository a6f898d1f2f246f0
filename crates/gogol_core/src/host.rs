//! The render host seam: whatever actually puts pixels on screen.

use glam::{Mat4, Vec2};

use crate::clip::Rect;
use crate::image::Image;

/// Draws regions of images at screen positions.
///
/// Screen space is one unit per pixel with the origin at the top-left corner
/// and y pointing down. Hosts upload each image at most once, the first time
/// it is drawn, keyed by `Image::path`.
pub trait RenderHost {
    fn draw_region(&mut self, image: &Image, src: Rect, dst: Vec2);
}

/// Translation and scale applied to everything drawn during one frame.
///
/// Calls compose the way successive matrix multiplications would, so a
/// translation issued after a scale moves by scaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub translation: Vec2,
    pub scale: Vec2,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    pub fn translate(&mut self, offset: Vec2) {
        self.translation += self.scale * offset;
    }

    /// Non-positive factors are ignored.
    pub fn scale(&mut self, factor: Vec2) {
        if factor.x > 0.0 && factor.y > 0.0 {
            self.scale *= factor;
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_translation(self.translation.extend(0.0))
            * Mat4::from_scale(self.scale.extend(1.0))
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_after_scale_moves_in_scaled_units() {
        let mut view = ViewTransform::IDENTITY;
        view.scale(Vec2::splat(2.0));
        view.translate(Vec2::new(10.0, 5.0));
        assert_eq!(view.translation, Vec2::new(20.0, 10.0));

        let p = view.to_mat4().transform_point3(glam::Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(p.truncate(), Vec2::new(22.0, 12.0));
    }

    #[test]
    fn non_positive_scale_is_ignored() {
        let mut view = ViewTransform::IDENTITY;
        view.scale(Vec2::new(0.0, 3.0));
        view.scale(Vec2::new(-1.0, -1.0));
        assert_eq!(view.scale, Vec2::ONE);
    }
}
