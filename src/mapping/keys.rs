//! Key name resolution
//!
//! Maps the textual key names used in layouts ("space", "esc", "w", ...)
//! to abstract key identities. Resolution happens once at startup, so an
//! unresolvable name aborts before the polling loop ever runs.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported key binding '{0}'")]
    UnsupportedBinding(String),
}

/// Abstract keyboard key identity.
///
/// Named variants cover the special keys a layout may bind; everything
/// else is a single printable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Escape,
    Enter,
    Tab,
    Shift,
    Ctrl,
    Alt,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "space"),
            Key::Escape => write!(f, "escape"),
            Key::Enter => write!(f, "enter"),
            Key::Tab => write!(f, "tab"),
            Key::Shift => write!(f, "shift"),
            Key::Ctrl => write!(f, "ctrl"),
            Key::Alt => write!(f, "alt"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Resolve a textual key name to a [`Key`].
///
/// Named special keys are matched case-insensitively. Any other name that
/// is exactly one alphanumeric character resolves to that literal
/// character (lowercased). Everything else is an unsupported binding.
pub fn resolve_key(name: &str) -> Result<Key, KeyError> {
    let lowered = name.to_ascii_lowercase();
    let key = match lowered.as_str() {
        "space" => Key::Space,
        "escape" | "esc" => Key::Escape,
        "enter" | "return" => Key::Enter,
        "tab" => Key::Tab,
        "shift" => Key::Shift,
        "ctrl" | "control" => Key::Ctrl,
        "alt" => Key::Alt,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c),
                _ => return Err(KeyError::UnsupportedBinding(name.to_string())),
            }
        }
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_named_keys() {
        assert_eq!(resolve_key("space").unwrap(), Key::Space);
        assert_eq!(resolve_key("escape").unwrap(), Key::Escape);
        assert_eq!(resolve_key("return").unwrap(), Key::Enter);
        assert_eq!(resolve_key("control").unwrap(), Key::Ctrl);
        assert_eq!(resolve_key("left").unwrap(), Key::Left);
    }

    #[test]
    fn named_keys_are_case_insensitive() {
        assert_eq!(resolve_key("Esc").unwrap(), Key::Escape);
        assert_eq!(resolve_key("SPACE").unwrap(), Key::Space);
        assert_eq!(resolve_key("Shift").unwrap(), Key::Shift);
    }

    #[test]
    fn resolves_printable_characters() {
        assert_eq!(resolve_key("r").unwrap(), Key::Char('r'));
        assert_eq!(resolve_key("W").unwrap(), Key::Char('w'));
        assert_eq!(resolve_key("4").unwrap(), Key::Char('4'));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            resolve_key("$"),
            Err(KeyError::UnsupportedBinding(_))
        ));
        assert!(matches!(
            resolve_key("not_a_key"),
            Err(KeyError::UnsupportedBinding(_))
        ));
        assert!(matches!(resolve_key(""), Err(KeyError::UnsupportedBinding(_))));
    }
}
