use std::sync::Arc;

use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

use gogol_core::WindowRequest;

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: gogol_core::handler::DEFAULT_TITLE.to_string(),
            width: 640,
            height: 640,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    Ok(Arc::new(window))
}

/// Apply a handler request that only concerns the window. Returns false for
/// requests the caller must handle itself (exit).
pub fn apply_window_request(window: &Window, request: &WindowRequest) -> bool {
    match request {
        WindowRequest::ShowCursor => window.set_cursor_visible(true),
        WindowRequest::HideCursor => window.set_cursor_visible(false),
        WindowRequest::FullScreen => {
            log::info!("Entering full screen");
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        WindowRequest::Exit => return false,
    }
    true
}
