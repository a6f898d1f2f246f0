use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;

use gogol_core::{Image, Rect, RenderHost, ViewTransform};

use crate::batch::QuadBatch;
use crate::camera::Camera2D;
use crate::gpu_context::GpuContext;
use crate::sprite_pipeline::SpritePipeline;
use crate::texture::Texture;
use crate::vertex::SpriteVertex;

const CLEAR_WHITE: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Owns the sprite pipeline, uploaded textures, and the per-frame quad batch.
///
/// Per frame: `begin_frame`, draw the scene through `host`, `set_view`,
/// optionally `begin_overlay` and draw window-space UI through `host`, then
/// `render`.
pub struct SpriteRenderer {
    pipeline: SpritePipeline,
    camera: Camera2D,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    overlay_camera_buffer: wgpu::Buffer,
    overlay_camera_bind_group: wgpu::BindGroup,
    textures: HashMap<Arc<Path>, GpuSpriteTexture>,
    batch: QuadBatch,
    // Grown to the next power of two when a frame outgrows them; never shrunk.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    pub clear_color: wgpu::Color,
}

impl SpriteRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let camera = Camera2D::new(gpu.size.0, gpu.size.1);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let overlay_camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let overlay_camera_bind_group =
            pipeline.create_camera_bind_group(&gpu.device, &overlay_camera_buffer);

        Self {
            pipeline,
            camera,
            camera_buffer,
            camera_bind_group,
            overlay_camera_buffer,
            overlay_camera_bind_group,
            textures: HashMap::new(),
            batch: QuadBatch::new(),
            vertex_buffer: create_vertex_buffer(&gpu.device, 1),
            index_buffer: create_index_buffer(&gpu.device, 1),
            vertex_capacity: 1,
            index_capacity: 1,
            clear_color: CLEAR_WHITE,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.viewport = (width, height);
        }
    }

    pub fn begin_frame(&mut self) {
        self.batch.clear();
    }

    /// Render host for the current frame. Images are uploaded on first draw.
    pub fn host<'a>(&'a mut self, gpu: &'a GpuContext) -> FrameHost<'a> {
        FrameHost {
            renderer: self,
            device: &gpu.device,
            queue: &gpu.queue,
        }
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.camera.view = view;
    }

    /// Everything drawn after this, until the next `begin_frame`, ignores the
    /// view transform.
    pub fn begin_overlay(&mut self) {
        self.batch.begin_overlay();
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn quad_count(&self) -> usize {
        self.batch.quad_count()
    }

    pub fn draw_call_count(&self) -> usize {
        self.batch.draw_calls().len()
    }

    /// Texture plus mesh buffer memory in megabytes.
    pub fn estimate_memory_mb(&self) -> f32 {
        let texture_bytes: usize = self
            .textures
            .values()
            .map(|t| t.texture.size.0 as usize * t.texture.size.1 as usize * 4)
            .sum();
        let mesh_bytes = self.vertex_capacity * std::mem::size_of::<SpriteVertex>()
            + self.index_capacity * std::mem::size_of::<u32>();
        (texture_bytes + mesh_bytes) as f32 / (1024.0 * 1024.0)
    }

    pub fn render(&mut self, gpu: &GpuContext) {
        self.upload_mesh(gpu);
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );
        let overlay_camera = Camera2D::new(self.camera.viewport.0, self.camera.viewport.1);
        gpu.queue.write_buffer(
            &self.overlay_camera_buffer,
            0,
            bytemuck::cast_slice(&[overlay_camera.build_uniform()]),
        );

        let Some((frame, view)) = gpu.acquire_frame() else {
            return;
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Sprite Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.batch.is_empty() {
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                let layers = [
                    (&self.camera_bind_group, self.batch.scene_draw_calls()),
                    (
                        &self.overlay_camera_bind_group,
                        self.batch.overlay_draw_calls(),
                    ),
                ];
                for (camera_bind_group, draws) in layers {
                    if draws.is_empty() {
                        continue;
                    }
                    pass.set_bind_group(0, camera_bind_group, &[]);
                    for draw in draws {
                        let Some(texture) = self.textures.get(&draw.texture_key) else {
                            continue;
                        };
                        pass.set_bind_group(1, &texture.bind_group, &[]);
                        pass.draw_indexed(
                            draw.index_start..draw.index_start + draw.index_count,
                            0,
                            0..1,
                        );
                    }
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }

    fn upload_mesh(&mut self, gpu: &GpuContext) {
        let vertices = self.batch.vertices();
        let indices = self.batch.indices();

        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&gpu.device, self.vertex_capacity);
        }
        if indices.len() > self.index_capacity {
            self.index_capacity = indices.len().next_power_of_two();
            self.index_buffer = create_index_buffer(&gpu.device, self.index_capacity);
        }

        if !vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }
        if !indices.is_empty() {
            gpu.queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(indices));
        }
    }

    fn ensure_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &Image,
    ) -> Arc<Path> {
        if let Some((key, _)) = self.textures.get_key_value(image.path()) {
            return Arc::clone(key);
        }

        let key: Arc<Path> = Arc::from(image.path());
        let texture = Texture::from_rgba8(
            device,
            queue,
            image.pixels(),
            image.width(),
            image.height(),
            &image.path().to_string_lossy(),
        );
        let bind_group = self.pipeline.create_texture_bind_group(device, &texture);
        log::debug!(
            "Uploaded texture '{}' ({}x{})",
            image.path().display(),
            texture.size.0,
            texture.size.1
        );
        self.textures.insert(
            Arc::clone(&key),
            GpuSpriteTexture {
                texture,
                bind_group,
            },
        );
        key
    }
}

pub struct FrameHost<'a> {
    renderer: &'a mut SpriteRenderer,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl RenderHost for FrameHost<'_> {
    fn draw_region(&mut self, image: &Image, src: Rect, dst: Vec2) {
        if image.width() == 0 || image.height() == 0 {
            log::warn!("Skipping empty image '{}'", image.path().display());
            return;
        }
        let key = self.renderer.ensure_texture(self.device, self.queue, image);
        self.renderer
            .batch
            .push_region(&key, image.size(), src, dst);
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let size = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(4) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let size = (index_capacity * std::mem::size_of::<u32>()).max(4) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
