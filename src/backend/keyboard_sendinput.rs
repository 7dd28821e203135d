//! Windows SendInput keyboard backend (scancode-based).
//!
//! Injects keyboard events using Win32 `SendInput` with
//! `KEYEVENTF_SCANCODE`, which is generally more reliable for games than
//! virtual-key based injection. Arrow keys are extended keys and carry the
//! `KEYEVENTF_EXTENDEDKEY` flag.
//!
//! Safety: `SendInput` is inherently unsafe; the call is wrapped in a
//! small helper that converts a zero return into the last OS error.

use crate::backend::{BackendError, KeyboardBackend};
use crate::mapping::keys::Key;
use windows::Win32::Foundation::GetLastError;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE, VIRTUAL_KEY,
};

/// Backend that uses Win32 SendInput to synthesize keyboard events.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardSendInputBackend;

impl KeyboardSendInputBackend {
    pub fn new() -> Self {
        Self
    }

    fn send(key: Key, up: bool) -> Result<(), BackendError> {
        let (scan, extended) = scancode(key)?;

        let mut flags = KEYEVENTF_SCANCODE;
        if extended {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        if up {
            flags |= KEYEVENTF_KEYUP;
        }

        let ki = KEYBDINPUT {
            wVk: VIRTUAL_KEY(0),
            wScan: scan,
            dwFlags: KEYBD_EVENT_FLAGS(flags.0),
            time: 0,
            dwExtraInfo: 0,
        };

        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 { ki },
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
}

impl KeyboardBackend for KeyboardSendInputBackend {
    fn key_down(&self, key: Key) -> Result<(), BackendError> {
        Self::send(key, false)
    }

    fn key_up(&self, key: Key) -> Result<(), BackendError> {
        Self::send(key, true)
    }
}

/// US keyboard Set 1 scancode for a key, plus whether it is an extended key.
/// Reference: https://www.win.tue.nl/~aeb/linux/kbd/scancodes-1.html
fn scancode(key: Key) -> Result<(u16, bool), BackendError> {
    let code = match key {
        Key::Space => 0x39,
        Key::Escape => 0x01,
        Key::Enter => 0x1C,
        Key::Tab => 0x0F,
        Key::Shift => 0x2A,
        Key::Ctrl => 0x1D,
        Key::Alt => 0x38,
        Key::Up => return Ok((0x48, true)),
        Key::Down => return Ok((0x50, true)),
        Key::Left => return Ok((0x4B, true)),
        Key::Right => return Ok((0x4D, true)),
        Key::Char(c) => char_scancode(c).ok_or(BackendError::UnsupportedKey(key))?,
    };
    Ok((code, false))
}

fn char_scancode(c: char) -> Option<u16> {
    let code = match c.to_ascii_lowercase() {
        'a' => 0x1E,
        'b' => 0x30,
        'c' => 0x2E,
        'd' => 0x20,
        'e' => 0x12,
        'f' => 0x21,
        'g' => 0x22,
        'h' => 0x23,
        'i' => 0x17,
        'j' => 0x24,
        'k' => 0x25,
        'l' => 0x26,
        'm' => 0x32,
        'n' => 0x31,
        'o' => 0x18,
        'p' => 0x19,
        'q' => 0x10,
        'r' => 0x13,
        's' => 0x1F,
        't' => 0x14,
        'u' => 0x16,
        'v' => 0x2F,
        'w' => 0x11,
        'x' => 0x2D,
        'y' => 0x15,
        'z' => 0x2C,
        '1' => 0x02,
        '2' => 0x03,
        '3' => 0x04,
        '4' => 0x05,
        '5' => 0x06,
        '6' => 0x07,
        '7' => 0x08,
        '8' => 0x09,
        '9' => 0x0A,
        '0' => 0x0B,
        _ => return None,
    };
    Some(code)
}
