//! CPU-side quad batching.
//!
//! Every region drawn in a frame becomes one quad (4 vertices, 6 indices) in
//! draw order. Consecutive quads that sample the same texture collapse into a
//! single draw call, so a frame that tiles one animation across the screen
//! costs one `draw_indexed`.
//!
//! Quads pushed after `begin_overlay` form a second layer that is drawn
//! without the view transform. Draw calls never merge across the layers.

use std::path::Path;
use std::sync::Arc;

use glam::Vec2;

use gogol_core::Rect;

use crate::vertex::SpriteVertex;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A contiguous run of indices that share one texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_key: Arc<Path>,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct QuadBatch {
    vertices: Vec<SpriteVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall>,
    // Index into `draw_calls` where the overlay layer starts.
    overlay_start: Option<usize>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.overlay_start = None;
    }

    /// Start the overlay layer. Later calls in the same frame are no-ops.
    pub fn begin_overlay(&mut self) {
        if self.overlay_start.is_none() {
            self.overlay_start = Some(self.draw_calls.len());
        }
    }

    /// Queue `src` (texture pixels) drawn with its top-left corner at `dst`
    /// (screen pixels) at its natural size.
    pub fn push_region(
        &mut self,
        texture_key: &Arc<Path>,
        texture_size: (u32, u32),
        src: Rect,
        dst: Vec2,
    ) {
        let tw = texture_size.0.max(1) as f32;
        let th = texture_size.1.max(1) as f32;
        let u0 = src.x as f32 / tw;
        let v0 = src.y as f32 / th;
        let u1 = (src.x as f32 + src.width as f32) / tw;
        let v1 = (src.y as f32 + src.height as f32) / th;

        let left = dst.x;
        let top = dst.y;
        let right = dst.x + src.width as f32;
        let bottom = dst.y + src.height as f32;

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            SpriteVertex {
                position: [left, top],
                tex_coords: [u0, v0],
                color: WHITE,
            },
            SpriteVertex {
                position: [right, top],
                tex_coords: [u1, v0],
                color: WHITE,
            },
            SpriteVertex {
                position: [right, bottom],
                tex_coords: [u1, v1],
                color: WHITE,
            },
            SpriteVertex {
                position: [left, bottom],
                tex_coords: [u0, v1],
                color: WHITE,
            },
        ]);

        let index_start = self.indices.len() as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.push_draw_call(texture_key, index_start, 6);
    }

    fn push_draw_call(&mut self, texture_key: &Arc<Path>, index_start: u32, index_count: u32) {
        let layer_start = self.overlay_start.unwrap_or(0);
        if self.draw_calls.len() <= layer_start {
            self.draw_calls.push(DrawCall {
                texture_key: Arc::clone(texture_key),
                index_start,
                index_count,
            });
            return;
        }
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if contiguous && *last.texture_key == **texture_key {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture_key: Arc::clone(texture_key),
            index_start,
            index_count,
        });
    }

    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Draw calls drawn with the view transform.
    pub fn scene_draw_calls(&self) -> &[DrawCall] {
        let end = self.overlay_start.unwrap_or(self.draw_calls.len());
        &self.draw_calls[..end]
    }

    /// Draw calls drawn in window pixels, after the scene.
    pub fn overlay_draw_calls(&self) -> &[DrawCall] {
        let start = self.overlay_start.unwrap_or(self.draw_calls.len());
        &self.draw_calls[start..]
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
