//! Mock keyboard backend for dry runs and testing.
//!
//! Logs key events instead of injecting them into the OS, so a layout can
//! be exercised end to end without taking over the host keyboard.

use crate::backend::{BackendError, KeyboardBackend};
use crate::mapping::keys::Key;
use log::info;

/// Mock keyboard backend that logs events instead of sending them.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockKeyboardBackend;

impl MockKeyboardBackend {
    pub fn new() -> Self {
        Self
    }
}

impl KeyboardBackend for MockKeyboardBackend {
    fn key_down(&self, key: Key) -> Result<(), BackendError> {
        info!("[MOCK KEYBOARD] Key DOWN: {}", key);
        Ok(())
    }

    fn key_up(&self, key: Key) -> Result<(), BackendError> {
        info!("[MOCK KEYBOARD] Key UP: {}", key);
        Ok(())
    }
}
