//! Windows SendInput mouse backend (relative movement and buttons).
//!
//! Minimal backend to send relative mouse motion and button events via
//! Win32 SendInput. Safety: same caveats as the keyboard backend; the
//! unsafe call is wrapped and a zero return surfaces the last OS error.

use crate::backend::{BackendError, MouseBackend, MouseButton};
use windows::Win32::Foundation::GetLastError;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct MouseSendInputBackend;

impl MouseSendInputBackend {
    pub fn new() -> Self {
        Self
    }

    fn send(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> Result<(), BackendError> {
        let mi = MOUSEINPUT {
            dx,
            dy,
            mouseData: 0,
            dwFlags: flags,
            time: 0,
            dwExtraInfo: 0,
        };

        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 { mi },
        };

        // SAFETY: Win32 call with a single well-formed INPUT struct.
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            let err = unsafe { GetLastError() };
            return Err(BackendError::Operation(format!(
                "SendInput failed: 0x{:08X}",
                err.0
            )));
        }
        Ok(())
    }

    fn down_flag(button: MouseButton) -> MOUSE_EVENT_FLAGS {
        match button {
            MouseButton::Left => MOUSEEVENTF_LEFTDOWN,
            MouseButton::Right => MOUSEEVENTF_RIGHTDOWN,
            MouseButton::Middle => MOUSEEVENTF_MIDDLEDOWN,
        }
    }

    fn up_flag(button: MouseButton) -> MOUSE_EVENT_FLAGS {
        match button {
            MouseButton::Left => MOUSEEVENTF_LEFTUP,
            MouseButton::Right => MOUSEEVENTF_RIGHTUP,
            MouseButton::Middle => MOUSEEVENTF_MIDDLEUP,
        }
    }
}

impl MouseBackend for MouseSendInputBackend {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), BackendError> {
        Self::send(dx, dy, MOUSEEVENTF_MOVE)
    }

    fn button_down(&self, button: MouseButton) -> Result<(), BackendError> {
        Self::send(0, 0, Self::down_flag(button))
    }

    fn button_up(&self, button: MouseButton) -> Result<(), BackendError> {
        Self::send(0, 0, Self::up_flag(button))
    }
}
