//! Application callbacks driven by the window event loop.
//!
//! `Handler` is a capability set: every method has a no-op default, so an
//! application implements only the events it cares about. Each callback gets
//! a `Controls` through which it asks the host for window-level changes; the
//! host applies them once the callback returns.

use std::time::Duration;

use glam::Vec2;

use crate::host::{RenderHost, ViewTransform};
use crate::input::{Key, MouseButton};

pub const DEFAULT_TITLE: &str = "gogol";

#[allow(unused_variables)]
pub trait Handler {
    /// Called once after the window exists, before the first frame.
    fn ready(&mut self, controls: &mut Controls) {}

    /// Called whenever the window is resized, with the new size in pixels.
    fn reshape(&mut self, width: u32, height: u32, controls: &mut Controls) {}

    /// Called every frame with the time since the previous frame. All
    /// drawing happens here.
    fn display(&mut self, delta: Duration, host: &mut dyn RenderHost, controls: &mut Controls) {}

    /// Called every frame after `display`, for UI drawn on top of the scene.
    /// The view transform does not apply here: positions are window pixels.
    fn display_post(&mut self, host: &mut dyn RenderHost, controls: &mut Controls) {}

    /// A key was pressed (`is_down`) or released. Held keys do not repeat.
    fn keyboard(&mut self, key: Key, is_down: bool, controls: &mut Controls) {}

    /// A mouse button changed state with the cursor at `(x, y)`.
    fn mouse(
        &mut self,
        button: MouseButton,
        is_down: bool,
        x: f32,
        y: f32,
        controls: &mut Controls,
    ) {
    }

    /// The cursor moved to `(x, y)`.
    fn motion(&mut self, x: f32, y: f32, controls: &mut Controls) {}

    /// The cursor entered (`true`) or left (`false`) the window.
    fn entry(&mut self, is_enter: bool, controls: &mut Controls) {}

    /// Window title, read once at startup.
    fn title(&self) -> String {
        DEFAULT_TITLE.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowRequest {
    ShowCursor,
    HideCursor,
    FullScreen,
    Exit,
}

/// Requests a handler makes of its host, plus the view transform for the
/// frame being drawn.
#[derive(Debug, Default)]
pub struct Controls {
    requests: Vec<WindowRequest>,
    view: ViewTransform,
    window_size: (u32, u32),
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_cursor(&mut self) {
        self.requests.push(WindowRequest::ShowCursor);
    }

    pub fn hide_cursor(&mut self) {
        self.requests.push(WindowRequest::HideCursor);
    }

    pub fn full_screen(&mut self) {
        self.requests.push(WindowRequest::FullScreen);
    }

    pub fn exit(&mut self) {
        self.requests.push(WindowRequest::Exit);
    }

    /// Move everything drawn afterwards this frame by `(x, y)`.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.view.translate(Vec2::new(x, y));
    }

    /// Scale everything drawn this frame. Non-positive factors are ignored.
    pub fn scale(&mut self, x: f32, y: f32) {
        self.view.scale(Vec2::new(x, y));
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Current window size in pixels, `(0, 0)` before the window exists.
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Hosts record the size here before calling `reshape`.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Reset the view to identity; hosts call this before each display.
    pub fn begin_frame(&mut self) {
        self.view = ViewTransform::IDENTITY;
    }

    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }
}
