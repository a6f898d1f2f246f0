//! wgpu render host for `gogol_core`.
//!
//! `SpriteRenderer` collects every region drawn during a frame into one CPU
//! quad batch, uploads each image the first time it is drawn, and flushes the
//! batch in a single render pass with draw calls merged per texture.

pub mod batch;
pub mod camera;
pub mod error;
pub mod gpu_context;
pub mod renderer;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use batch::{DrawCall, QuadBatch};
pub use camera::{Camera2D, CameraUniform};
pub use error::RenderError;
pub use gpu_context::GpuContext;
pub use renderer::{FrameHost, SpriteRenderer};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use vertex::SpriteVertex;
