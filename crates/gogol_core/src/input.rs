//! Keys, mouse buttons, and the held-state tracking used to turn raw window
//! events into handler callbacks.
//!
//! Windowing layers report auto-repeat as a stream of presses. `InputState`
//! only reports a transition when the held state actually changes, so a key
//! held down reaches the handler as one press and one release.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Tab,
    Return,
    Escape,
    Space,
    Left,
    Up,
    Right,
    Down,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    /// Function keys F1 through F12.
    F(u8),
    /// Any other printable character.
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    mouse_held: HashSet<MouseButton>,
    mouse_position: Vec2,
    cursor_inside: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this is a new press.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    /// Returns true if the key was held.
    pub fn key_up(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    pub fn mouse_down(&mut self, button: MouseButton) -> bool {
        self.mouse_held.insert(button)
    }

    pub fn mouse_up(&mut self, button: MouseButton) -> bool {
        self.mouse_held.remove(&button)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Last cursor position reported by the window, in pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Returns true if the cursor crossed the window edge.
    pub fn set_cursor_inside(&mut self, inside: bool) -> bool {
        let changed = self.cursor_inside != inside;
        self.cursor_inside = inside;
        changed
    }

    pub fn is_cursor_inside(&self) -> bool {
        self.cursor_inside
    }

    /// Forget everything held, e.g. when the window loses focus and release
    /// events will never arrive. Returns what was held so the caller can
    /// report the releases.
    pub fn release_all(&mut self) -> (Vec<Key>, Vec<MouseButton>) {
        let keys = self.held.drain().collect();
        let buttons = self.mouse_held.drain().collect();
        (keys, buttons)
    }
}
