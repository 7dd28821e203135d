//! Layout loader and validator
//!
//! The layout declares which controller axes and buttons drive which
//! virtual inputs: a discrete movement pad, a continuous look pad, two
//! triggers, the face-button key bindings, and the exit button. It is
//! built once at startup, either from the built-in default or from a JSON
//! override file, and is read-only afterwards.

use crate::backend::MouseButton;
use crate::mapping::keys::{resolve_key, Key, KeyError};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default movement threshold for the discrete pad.
pub const DEFAULT_MOVE_THRESHOLD: f32 = 0.45;
/// Default deadzone for the continuous look pad.
pub const DEFAULT_LOOK_DEADZONE: f32 = 0.08;
/// Default look sensitivity (axis value to pixels per tick).
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 18.0;
/// Default trigger activation threshold.
pub const DEFAULT_TRIGGER_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse layout file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid layout: {0}")]
    Invalid(String),

    #[error(transparent)]
    Binding(#[from] KeyError),
}

/// Discrete movement pad: each axis of the pair drives a key pair.
#[derive(Debug, Clone)]
pub struct MovementPad {
    pub x_axis: usize,
    pub y_axis: usize,
    pub threshold: f32,
    /// Pressed when the x axis reads at or below -threshold.
    pub neg_x: Key,
    /// Pressed when the x axis reads at or above +threshold.
    pub pos_x: Key,
    pub neg_y: Key,
    pub pos_y: Key,
}

/// Continuous look pad: axis values become relative mouse deltas.
#[derive(Debug, Clone)]
pub struct LookPad {
    pub x_axis: usize,
    pub y_axis: usize,
    pub deadzone: f32,
    pub sensitivity: f32,
}

/// One trigger axis mapped to a mouse button.
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    pub axis: usize,
    pub threshold: f32,
    pub button: MouseButton,
}

/// One digital button mapped to a key.
#[derive(Debug, Clone)]
pub struct ButtonBinding {
    pub button: usize,
    pub key: Key,
}

/// Complete, resolved input layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub movement: MovementPad,
    pub look: LookPad,
    pub left_trigger: TriggerConfig,
    pub right_trigger: TriggerConfig,
    pub bindings: Vec<ButtonBinding>,
    pub exit_button: usize,
}

impl Layout {
    /// Load a layout: the built-in default, or a JSON override file.
    ///
    /// An override must spell out every field; there is no merging of
    /// partial overrides with defaults.
    pub fn load(path: Option<&Path>) -> Result<Layout, LayoutError> {
        let file = match path {
            None => {
                info!("Using built-in default layout");
                LayoutFile::default_file()
            }
            Some(p) => {
                info!("Loading layout override from: {}", p.display());
                let content = std::fs::read_to_string(p)?;
                serde_json::from_str(&content)?
            }
        };

        let layout = file.into_layout()?;
        layout.validate()?;
        debug!(
            "Layout ready: {} button bindings, exit button {}",
            layout.bindings.len(),
            layout.exit_button
        );
        Ok(layout)
    }

    /// Validate index and tuning invariants.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.movement.x_axis == self.movement.y_axis {
            return Err(LayoutError::Invalid(format!(
                "left_pad axes must be distinct (both are {})",
                self.movement.x_axis
            )));
        }
        if self.look.x_axis == self.look.y_axis {
            return Err(LayoutError::Invalid(format!(
                "right_pad axes must be distinct (both are {})",
                self.look.x_axis
            )));
        }
        if !(self.movement.threshold > 0.0 && self.movement.threshold <= 1.0) {
            return Err(LayoutError::Invalid(
                "movement threshold must be in (0.0, 1.0]".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.look.deadzone) {
            return Err(LayoutError::Invalid(
                "look deadzone must be in [0.0, 1.0)".into(),
            ));
        }
        if self.look.sensitivity <= 0.0 {
            return Err(LayoutError::Invalid(
                "look sensitivity must be positive".into(),
            ));
        }
        for trigger in [&self.left_trigger, &self.right_trigger] {
            if !(-1.0..=1.0).contains(&trigger.threshold) {
                return Err(LayoutError::Invalid(
                    "trigger threshold must be in [-1.0, 1.0]".into(),
                ));
            }
        }
        Ok(())
    }
}

/// On-disk layout shape. Every field is required; indices are validated by
/// the unsigned types (a negative index fails deserialization).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFile {
    axes: AxesSection,
    triggers: TriggersSection,
    buttons: ButtonsSection,
    exit_button: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AxesSection {
    left_pad: AxisPairFile,
    right_pad: AxisPairFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AxisPairFile {
    x: usize,
    y: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriggersSection {
    left: usize,
    right: usize,
}

/// All eight button roles are declared in the file, but only the face
/// buttons carry key bindings; back doubles as the default exit button.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ButtonsSection {
    a: usize,
    b: usize,
    x: usize,
    y: usize,
    lb: usize,
    rb: usize,
    back: usize,
    start: usize,
}

impl LayoutFile {
    fn default_file() -> Self {
        LayoutFile {
            axes: AxesSection {
                left_pad: AxisPairFile { x: 0, y: 1 },
                right_pad: AxisPairFile { x: 2, y: 3 },
            },
            triggers: TriggersSection { left: 4, right: 5 },
            buttons: ButtonsSection {
                a: 0,
                b: 1,
                x: 2,
                y: 3,
                lb: 4,
                rb: 5,
                back: 6,
                start: 7,
            },
            exit_button: 6,
        }
    }

    /// Resolve key names and build the runtime layout. The key names are
    /// fixed per role; overrides only remap physical indices.
    fn into_layout(self) -> Result<Layout, LayoutError> {
        let movement = MovementPad {
            x_axis: self.axes.left_pad.x,
            y_axis: self.axes.left_pad.y,
            threshold: DEFAULT_MOVE_THRESHOLD,
            neg_x: resolve_key("a")?,
            pos_x: resolve_key("d")?,
            neg_y: resolve_key("w")?,
            pos_y: resolve_key("s")?,
        };
        let look = LookPad {
            x_axis: self.axes.right_pad.x,
            y_axis: self.axes.right_pad.y,
            deadzone: DEFAULT_LOOK_DEADZONE,
            sensitivity: DEFAULT_LOOK_SENSITIVITY,
        };
        let bindings = vec![
            ButtonBinding {
                button: self.buttons.a,
                key: resolve_key("space")?,
            },
            ButtonBinding {
                button: self.buttons.b,
                key: resolve_key("escape")?,
            },
            ButtonBinding {
                button: self.buttons.x,
                key: resolve_key("r")?,
            },
            ButtonBinding {
                button: self.buttons.y,
                key: resolve_key("e")?,
            },
        ];

        Ok(Layout {
            movement,
            look,
            left_trigger: TriggerConfig {
                axis: self.triggers.left,
                threshold: DEFAULT_TRIGGER_THRESHOLD,
                button: MouseButton::Left,
            },
            right_trigger: TriggerConfig {
                axis: self.triggers.right,
                threshold: DEFAULT_TRIGGER_THRESHOLD,
                button: MouseButton::Right,
            },
            bindings,
            exit_button: self.exit_button,
        })
    }
}
