use glam::Mat4;

use gogol_core::ViewTransform;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: one unit per pixel, origin at the top-left corner,
/// y down. The view transform is applied before projection.
pub struct Camera2D {
    pub viewport: (u32, u32),
    pub view: ViewTransform,
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
            view: ViewTransform::IDENTITY,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let width = self.viewport.0.max(1) as f32;
        let height = self.viewport.1.max(1) as f32;
        let proj = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        proj * self.view.to_mat4()
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
