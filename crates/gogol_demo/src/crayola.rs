//! The crayola demo: one animated sequence tiled across the whole window.
//!
//! Keys: `.` zooms in, `,` zooms out, space pauses or resumes, escape quits.
//! Dragging with the left button pans the view.

use std::time::{Duration, Instant};

use glam::Vec2;

use gogol_core::{Controls, Handler, Key, MouseButton, RenderHost, Sequence};

const MIN_SCALE: f32 = 1.0;

pub struct Crayola {
    title: String,
    sequence: Sequence,
    scale: f32,
    full_screen: bool,
    size: (u32, u32),
    offset: Vec2,
    drag_from: Option<Vec2>,
}

impl Crayola {
    pub fn new(title: String, sequence: Sequence, scale: f32, full_screen: bool) -> Self {
        Self {
            title,
            sequence,
            scale: scale.max(MIN_SCALE),
            full_screen,
            size: (0, 0),
            offset: Vec2::ZERO,
            drag_from: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Top-left corners of every tile needed to cover the visible area, in
    /// view space. The grid stays aligned to the clip size while panning.
    fn tile_positions(&self) -> Vec<Vec2> {
        let (clip_width, clip_height) = self.sequence.sprite().clip_size();
        let clip = Vec2::new(clip_width as f32, clip_height as f32);
        let window = Vec2::new(self.size.0 as f32, self.size.1 as f32);
        let visible_min = -self.offset / self.scale;
        let visible_max = (window - self.offset) / self.scale;
        let first = (visible_min / clip).floor() * clip;

        let mut positions = Vec::new();
        let mut y = first.y;
        while y < visible_max.y {
            let mut x = first.x;
            while x < visible_max.x {
                positions.push(Vec2::new(x, y));
                x += clip.x;
            }
            y += clip.y;
        }
        positions
    }

    fn toggle_playback(&mut self, controls: &mut Controls) {
        self.sequence.toggle();
        if self.sequence.is_playing() {
            controls.hide_cursor();
            log::info!("Resumed at frame {}", self.sequence.current());
        } else {
            controls.show_cursor();
            log::info!("Paused at frame {}", self.sequence.current());
        }
    }
}

impl Handler for Crayola {
    fn ready(&mut self, controls: &mut Controls) {
        self.sequence.play(self.sequence.speed());
        controls.hide_cursor();
        if self.full_screen {
            controls.full_screen();
        }
    }

    fn reshape(&mut self, width: u32, height: u32, _controls: &mut Controls) {
        self.size = (width, height);
    }

    fn display(&mut self, _delta: Duration, host: &mut dyn RenderHost, controls: &mut Controls) {
        controls.translate(self.offset.x, self.offset.y);
        controls.scale(self.scale, self.scale);

        // Sample once so every tile shows the same frame.
        let now = Instant::now();
        for pos in self.tile_positions() {
            if let Err(err) = self.sequence.draw_frame_at_time(host, pos, now) {
                log::error!("Failed to draw frame: {err}");
                return;
            }
        }
    }

    fn keyboard(&mut self, key: Key, is_down: bool, controls: &mut Controls) {
        if !is_down {
            return;
        }
        match key {
            Key::Char('.') => self.scale += 1.0,
            Key::Char(',') => self.scale = (self.scale - 1.0).max(MIN_SCALE),
            Key::Space => self.toggle_playback(controls),
            Key::Escape => controls.exit(),
            _ => {}
        }
    }

    fn mouse(
        &mut self,
        button: MouseButton,
        is_down: bool,
        x: f32,
        y: f32,
        _controls: &mut Controls,
    ) {
        if button == MouseButton::Left {
            self.drag_from = is_down.then(|| Vec2::new(x, y));
        }
    }

    fn motion(&mut self, x: f32, y: f32, _controls: &mut Controls) {
        if let Some(from) = self.drag_from {
            let to = Vec2::new(x, y);
            self.offset += to - from;
            self.drag_from = Some(to);
        }
    }

    fn entry(&mut self, is_enter: bool, _controls: &mut Controls) {
        if !is_enter {
            self.drag_from = None;
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
