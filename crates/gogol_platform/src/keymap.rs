//! Translation from winit input events to `gogol_core` keys and buttons.
//!
//! Keys are mapped from the logical key so that printable characters follow
//! the active keyboard layout. Modifier keys carry their side in the physical
//! location, which winit reports separately.

use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::{Key as WinitKey, KeyLocation, NamedKey};

use gogol_core::{Key, MouseButton};

pub fn map_key(key: &WinitKey, location: KeyLocation) -> Option<Key> {
    let right = location == KeyLocation::Right;
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Enter => Some(Key::Return),
            NamedKey::Escape => Some(Key::Escape),
            NamedKey::Space => Some(Key::Space),
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::Shift if right => Some(Key::ShiftRight),
            NamedKey::Shift => Some(Key::ShiftLeft),
            NamedKey::Control if right => Some(Key::ControlRight),
            NamedKey::Control => Some(Key::ControlLeft),
            NamedKey::Alt if right => Some(Key::AltRight),
            NamedKey::Alt => Some(Key::AltLeft),
            NamedKey::F1 => Some(Key::F(1)),
            NamedKey::F2 => Some(Key::F(2)),
            NamedKey::F3 => Some(Key::F(3)),
            NamedKey::F4 => Some(Key::F(4)),
            NamedKey::F5 => Some(Key::F(5)),
            NamedKey::F6 => Some(Key::F(6)),
            NamedKey::F7 => Some(Key::F(7)),
            NamedKey::F8 => Some(Key::F(8)),
            NamedKey::F9 => Some(Key::F(9)),
            NamedKey::F10 => Some(Key::F(10)),
            NamedKey::F11 => Some(Key::F(11)),
            NamedKey::F12 => Some(Key::F(12)),
            _ => None,
        },
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Some(Key::Space),
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

pub fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_map_to_core_keys() {
        let std = KeyLocation::Standard;
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Escape), std), Some(Key::Escape));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Space), std), Some(Key::Space));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::F12), std), Some(Key::F(12)));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::CapsLock), std), None);
    }

    #[test]
    fn modifiers_use_key_location() {
        let shift = WinitKey::Named(NamedKey::Shift);
        assert_eq!(map_key(&shift, KeyLocation::Left), Some(Key::ShiftLeft));
        assert_eq!(map_key(&shift, KeyLocation::Right), Some(Key::ShiftRight));
    }

    #[test]
    fn single_characters_map_to_char() {
        let std = KeyLocation::Standard;
        assert_eq!(map_key(&WinitKey::Character(".".into()), std), Some(Key::Char('.')));
        assert_eq!(map_key(&WinitKey::Character(" ".into()), std), Some(Key::Space));
        assert_eq!(map_key(&WinitKey::Character("ab".into()), std), None);
    }

    #[test]
    fn extra_mouse_buttons_are_ignored() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_mouse_button(WinitMouseButton::Back), None);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), None);
    }
}
