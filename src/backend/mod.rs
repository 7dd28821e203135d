//! Injection-sink abstraction for keyboard and mouse output
//!
//! This module provides a unified interface for sending synthetic keyboard
//! and mouse events to the operating system.

pub mod mock_keyboard;
pub mod mock_mouse;
pub mod recording;

#[cfg(windows)]
pub mod keyboard_sendinput;
#[cfg(windows)]
pub mod mouse_sendinput;

#[cfg(windows)]
pub use keyboard_sendinput::KeyboardSendInputBackend;
#[cfg(windows)]
pub use mouse_sendinput::MouseSendInputBackend;

pub use mock_keyboard::MockKeyboardBackend;
pub use mock_mouse::MockMouseBackend;
pub use recording::{Recorder, RecordingKeyboard, RecordingMouse, SinkEvent};

use crate::mapping::keys::Key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend operation failed: {0}")]
    Operation(String),

    #[error("key not supported by this backend: {0}")]
    UnsupportedKey(Key),

    #[error("platform not supported")]
    PlatformNotSupported,
}

/// Unified backend interface for keyboard injection.
pub trait KeyboardBackend {
    /// Press a key (key down event).
    fn key_down(&self, key: Key) -> Result<(), BackendError>;

    /// Release a key (key up event).
    fn key_up(&self, key: Key) -> Result<(), BackendError>;
}

/// Unified backend interface for mouse injection.
pub trait MouseBackend {
    /// Move the mouse relatively by (dx, dy) pixels.
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), BackendError>;

    /// Press a mouse button (button down event).
    fn button_down(&self, button: MouseButton) -> Result<(), BackendError>;

    /// Release a mouse button (button up event).
    fn button_up(&self, button: MouseButton) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn as_str(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}
