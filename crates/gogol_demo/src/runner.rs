//! Drives a `Handler` from the winit event loop.
//!
//! Window events are translated into handler callbacks as they arrive.
//! `RedrawRequested` is the frame tick: measure the delta, reset the view,
//! let the handler draw the scene and then its window-space overlay into the
//! sprite batch, then flush it to the GPU.
//! Window requests the handler queued on `Controls` are applied after every
//! event.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use gogol_core::{Controls, FrameClock, Handler, InputState, Key};
use gogol_platform::{
    apply_window_request, create_window, map_key, map_mouse_button, PlatformConfig,
};
use gogol_render::{GpuContext, SpriteRenderer};

const STATS_LOG_INTERVAL: u64 = 600;

struct RunState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SpriteRenderer,
}

pub struct App<H: Handler> {
    config: PlatformConfig,
    handler: H,
    state: Option<RunState>,
    input: InputState,
    // Releases are matched by physical key so modifier changes between press
    // and release cannot leave a key held.
    pressed_keys: HashMap<PhysicalKey, Key>,
    clock: FrameClock,
    controls: Controls,
}

impl<H: Handler> App<H> {
    pub fn new(handler: H) -> Self {
        let config = PlatformConfig {
            title: handler.title(),
            ..PlatformConfig::default()
        };
        Self {
            config,
            handler,
            state: None,
            input: InputState::new(),
            pressed_keys: HashMap::new(),
            clock: FrameClock::new(),
            controls: Controls::new(),
        }
    }

    fn apply_requests(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        for request in self.controls.take_requests() {
            if !apply_window_request(&state.window, &request) {
                log::info!("Exit requested by handler");
                event_loop.exit();
            }
        }
    }

    fn redraw(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
            return;
        }

        let delta = self.clock.begin_frame(Instant::now());
        self.controls.begin_frame();
        state.renderer.begin_frame();
        {
            let mut host = state.renderer.host(&state.gpu);
            self.handler.display(delta, &mut host, &mut self.controls);
        }
        state.renderer.set_view(self.controls.view());
        state.renderer.begin_overlay();
        {
            let mut host = state.renderer.host(&state.gpu);
            self.handler.display_post(&mut host, &mut self.controls);
        }
        state.renderer.render(&state.gpu);

        if self.clock.frame_count % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "{:.1} fps ({:.2}ms), {} quads in {} draw calls, {} textures, ~{:.2} MB",
                self.clock.smoothed_fps,
                self.clock.smoothed_frame_time_ms,
                state.renderer.quad_count(),
                state.renderer.draw_call_count(),
                state.renderer.texture_count(),
                state.renderer.estimate_memory_mb()
            );
        }
    }
}

impl<H: Handler> ApplicationHandler for App<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = match create_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        let gpu = match GpuContext::new(Arc::clone(&window)) {
            Ok(gpu) => gpu,
            Err(err) => {
                log::error!("Failed to initialize GPU: {err}");
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "Window '{}' created: {}x{}",
            self.config.title,
            gpu.size.0,
            gpu.size.1
        );

        let renderer = SpriteRenderer::new(&gpu);
        let (width, height) = gpu.size;
        self.state = Some(RunState {
            window,
            gpu,
            renderer,
        });

        self.controls.set_window_size(width, height);
        self.handler.ready(&mut self.controls);
        self.handler.reshape(width, height, &mut self.controls);
        self.apply_requests(event_loop);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    state.gpu.resize(size.width, size.height);
                    state.renderer.resize(size.width, size.height);
                    log::info!("Resized to {}x{}", size.width, size.height);
                    self.controls.set_window_size(size.width, size.height);
                    self.handler
                        .reshape(size.width, size.height, &mut self.controls);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => match event.state {
                ElementState::Pressed if !event.repeat => {
                    if let Some(key) = map_key(&event.logical_key, event.location) {
                        self.pressed_keys.insert(event.physical_key, key);
                        if self.input.key_down(key) {
                            self.handler.keyboard(key, true, &mut self.controls);
                        }
                    }
                }
                ElementState::Pressed => {}
                ElementState::Released => {
                    if let Some(key) = self.pressed_keys.remove(&event.physical_key) {
                        if self.input.key_up(key) {
                            self.handler.keyboard(key, false, &mut self.controls);
                        }
                    }
                }
            },

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(button) = map_mouse_button(button) {
                    let is_down = button_state == ElementState::Pressed;
                    let changed = if is_down {
                        self.input.mouse_down(button)
                    } else {
                        self.input.mouse_up(button)
                    };
                    if changed {
                        let pos = self.input.mouse_position();
                        self.handler
                            .mouse(button, is_down, pos.x, pos.y, &mut self.controls);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pos = Vec2::new(position.x as f32, position.y as f32);
                self.input.set_mouse_position(pos);
                self.handler.motion(pos.x, pos.y, &mut self.controls);
            }

            WindowEvent::CursorEntered { .. } => {
                if self.input.set_cursor_inside(true) {
                    self.handler.entry(true, &mut self.controls);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if self.input.set_cursor_inside(false) {
                    self.handler.entry(false, &mut self.controls);
                }
            }

            WindowEvent::Focused(false) => {
                self.pressed_keys.clear();
                release_held(&mut self.input, &mut self.handler, &mut self.controls);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        self.apply_requests(event_loop);
    }
}

/// Report every held key and mouse button as released. Used when the window
/// loses focus and the real release events will not arrive.
fn release_held<H: Handler>(input: &mut InputState, handler: &mut H, controls: &mut Controls) {
    let pos = input.mouse_position();
    let (keys, buttons) = input.release_all();
    for key in keys {
        handler.keyboard(key, false, controls);
    }
    for button in buttons {
        handler.mouse(button, false, pos.x, pos.y, controls);
    }
}

pub fn run<H: Handler>(handler: H) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(handler);
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gogol_core::MouseButton;

    #[derive(Default)]
    struct Recorder {
        keys: Vec<(Key, bool)>,
        buttons: Vec<(MouseButton, bool, f32, f32)>,
    }

    impl Handler for Recorder {
        fn keyboard(&mut self, key: Key, is_down: bool, _controls: &mut Controls) {
            self.keys.push((key, is_down));
        }

        fn mouse(
            &mut self,
            button: MouseButton,
            is_down: bool,
            x: f32,
            y: f32,
            _controls: &mut Controls,
        ) {
            self.buttons.push((button, is_down, x, y));
        }
    }

    #[test]
    fn focus_loss_releases_held_buttons_and_keys() {
        let mut input = InputState::new();
        let mut handler = Recorder::default();
        let mut controls = Controls::new();

        input.key_down(Key::Space);
        input.mouse_down(MouseButton::Left);
        input.set_mouse_position(Vec2::new(12.0, 34.0));
        release_held(&mut input, &mut handler, &mut controls);

        assert_eq!(handler.keys, vec![(Key::Space, false)]);
        assert_eq!(handler.buttons, vec![(MouseButton::Left, false, 12.0, 34.0)]);
        assert!(!input.is_mouse_held(MouseButton::Left));
    }

    #[test]
    fn nothing_held_reports_nothing() {
        let mut input = InputState::new();
        let mut handler = Recorder::default();
        let mut controls = Controls::new();

        release_held(&mut input, &mut handler, &mut controls);

        assert!(handler.keys.is_empty());
        assert!(handler.buttons.is_empty());
    }
}
