pub mod keymap;
pub mod window;

pub use keymap::{map_key, map_mouse_button};
pub use window::{apply_window_request, create_window, PlatformConfig};
