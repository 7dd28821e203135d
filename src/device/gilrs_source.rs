//! gilrs-backed controller source.
//!
//! Maps the layout's integer axis/button indices onto fixed gilrs code
//! tables, so a layout stays portable across controllers that gilrs
//! normalizes the same way. Axis values from gilrs are already in
//! [-1.0, 1.0].

use crate::device::{DeviceError, DeviceInfo, PadSource};
use gilrs::{Axis, Button, GamepadId, Gilrs};
use log::{debug, info};

/// Axis index table: 0/1 left pad, 2/3 right pad, 4/5 triggers.
const AXES: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::LeftZ,
    Axis::RightZ,
];

/// Button index table: 0-3 face buttons, 4/5 bumpers, 6 back, 7 start.
const BUTTONS: [Button; 8] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::Select,
    Button::Start,
];

/// Enumerate detected controllers without acquiring any of them.
pub fn list_devices() -> Result<Vec<DeviceInfo>, DeviceError> {
    let gilrs = Gilrs::new().map_err(|e| DeviceError::Subsystem(e.to_string()))?;
    Ok(gilrs
        .gamepads()
        .enumerate()
        .map(|(index, (_id, pad))| DeviceInfo {
            index,
            name: pad.name().to_string(),
        })
        .collect())
}

/// Exclusive polling handle for one controller.
pub struct GilrsSource {
    gilrs: Gilrs,
    id: GamepadId,
}

impl GilrsSource {
    /// Acquire the controller at `index` among the detected gamepads.
    pub fn open(index: usize) -> Result<Self, DeviceError> {
        let gilrs = Gilrs::new().map_err(|e| DeviceError::Subsystem(e.to_string()))?;

        let ids: Vec<GamepadId> = gilrs.gamepads().map(|(id, _)| id).collect();
        if ids.is_empty() {
            return Err(DeviceError::NoControllerAvailable);
        }
        let id = *ids.get(index).ok_or(DeviceError::IndexOutOfRange {
            requested: index,
            available: ids.len(),
        })?;

        info!(
            "Acquired controller {}: {}",
            index,
            gilrs.gamepad(id).name()
        );
        Ok(Self { gilrs, id })
    }
}

impl PadSource for GilrsSource {
    fn pump(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            debug!("device event: {:?}", event.event);
        }
    }

    fn button(&self, index: usize) -> Result<bool, DeviceError> {
        let button = *BUTTONS
            .get(index)
            .ok_or(DeviceError::ReadOutOfRange {
                kind: "button",
                index,
            })?;
        let pad = self
            .gilrs
            .connected_gamepad(self.id)
            .ok_or(DeviceError::Disconnected)?;
        Ok(pad.is_pressed(button))
    }

    fn axis(&self, index: usize) -> Result<f32, DeviceError> {
        let axis = *AXES.get(index).ok_or(DeviceError::ReadOutOfRange {
            kind: "axis",
            index,
        })?;
        let pad = self
            .gilrs
            .connected_gamepad(self.id)
            .ok_or(DeviceError::Disconnected)?;
        Ok(pad.axis_data(axis).map(|d| d.value()).unwrap_or(0.0))
    }
}
