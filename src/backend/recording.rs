//! Recording backends for tests.
//!
//! Unlike the logging mocks, these capture every injected event in order
//! so tests can assert on the exact down/up sequence a tick produced.

use crate::backend::{BackendError, KeyboardBackend, MouseBackend, MouseButton};
use crate::mapping::keys::Key;
use std::sync::{Arc, Mutex};

/// A single event observed by a recording backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    MouseMove { dx: i32, dy: i32 },
}

/// Shared event log handed to a keyboard/mouse backend pair.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard backend writing into this recorder.
    pub fn keyboard(&self) -> RecordingKeyboard {
        RecordingKeyboard {
            events: Arc::clone(&self.events),
        }
    }

    /// Mouse backend writing into this recorder.
    pub fn mouse(&self) -> RecordingMouse {
        RecordingMouse {
            events: Arc::clone(&self.events),
        }
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drain all recorded events.
    pub fn take(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingKeyboard {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

#[derive(Debug, Clone)]
pub struct RecordingMouse {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl KeyboardBackend for RecordingKeyboard {
    fn key_down(&self, key: Key) -> Result<(), BackendError> {
        self.events.lock().unwrap().push(SinkEvent::KeyDown(key));
        Ok(())
    }

    fn key_up(&self, key: Key) -> Result<(), BackendError> {
        self.events.lock().unwrap().push(SinkEvent::KeyUp(key));
        Ok(())
    }
}

impl MouseBackend for RecordingMouse {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), BackendError> {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::MouseMove { dx, dy });
        Ok(())
    }

    fn button_down(&self, button: MouseButton) -> Result<(), BackendError> {
        self.events.lock().unwrap().push(SinkEvent::ButtonDown(button));
        Ok(())
    }

    fn button_up(&self, button: MouseButton) -> Result<(), BackendError> {
        self.events.lock().unwrap().push(SinkEvent::ButtonUp(button));
        Ok(())
    }
}
