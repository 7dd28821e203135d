//! Mock mouse backend for dry runs and testing.
//!
//! Logs mouse events instead of injecting them into the OS.

use crate::backend::{BackendError, MouseBackend, MouseButton};
use log::info;

/// Mock mouse backend that logs events instead of sending them.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockMouseBackend;

impl MockMouseBackend {
    pub fn new() -> Self {
        Self
    }
}

impl MouseBackend for MockMouseBackend {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), BackendError> {
        info!("[MOCK MOUSE] Move relative: dx={}, dy={}", dx, dy);
        Ok(())
    }

    fn button_down(&self, button: MouseButton) -> Result<(), BackendError> {
        info!("[MOCK MOUSE] Button DOWN: {}", button.as_str());
        Ok(())
    }

    fn button_up(&self, button: MouseButton) -> Result<(), BackendError> {
        info!("[MOCK MOUSE] Button UP: {}", button.as_str());
        Ok(())
    }
}
