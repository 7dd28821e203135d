//! Scripted controller source for tests.
//!
//! Plays back a fixed sequence of state frames, one per tick: the first
//! `pump` presents frame 0, each later `pump` advances by one, and the
//! final frame repeats once the script runs out. Reads past a frame's
//! axis/button vectors fail the same way a real out-of-range read does.

use crate::device::{DeviceError, PadSource};

/// One tick's worth of controller state.
#[derive(Debug, Clone, Default)]
pub struct PadFrame {
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
}

impl PadFrame {
    /// Neutral frame: all axes centered, no buttons pressed.
    pub fn neutral(axes: usize, buttons: usize) -> Self {
        Self {
            axes: vec![0.0; axes],
            buttons: vec![false; buttons],
        }
    }

    pub fn with_axis(mut self, index: usize, value: f32) -> Self {
        self.axes[index] = value;
        self
    }

    pub fn with_button(mut self, index: usize, pressed: bool) -> Self {
        self.buttons[index] = pressed;
        self
    }
}

/// Source that replays a prepared list of frames.
#[derive(Debug)]
pub struct ScriptedPad {
    frames: Vec<PadFrame>,
    cursor: usize,
    started: bool,
}

impl ScriptedPad {
    pub fn new(frames: Vec<PadFrame>) -> Self {
        Self {
            frames,
            cursor: 0,
            started: false,
        }
    }

    /// Number of frames presented so far.
    pub fn ticks_played(&self) -> usize {
        if self.started {
            self.cursor + 1
        } else {
            0
        }
    }

    fn current(&self) -> Result<&PadFrame, DeviceError> {
        if !self.started {
            return Err(DeviceError::Subsystem("read before first pump".into()));
        }
        self.frames
            .get(self.cursor)
            .ok_or_else(|| DeviceError::Subsystem("script exhausted".into()))
    }
}

impl PadSource for ScriptedPad {
    fn pump(&mut self) {
        if !self.started {
            self.started = true;
        } else if self.cursor + 1 < self.frames.len() {
            self.cursor += 1;
        }
    }

    fn button(&self, index: usize) -> Result<bool, DeviceError> {
        let frame = self.current()?;
        frame
            .buttons
            .get(index)
            .copied()
            .ok_or(DeviceError::ReadOutOfRange {
                kind: "button",
                index,
            })
    }

    fn axis(&self, index: usize) -> Result<f32, DeviceError> {
        let frame = self.current()?;
        frame
            .axes
            .get(index)
            .copied()
            .ok_or(DeviceError::ReadOutOfRange { kind: "axis", index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_advance_per_pump() {
        let frames = vec![
            PadFrame::neutral(2, 1).with_axis(0, 0.5),
            PadFrame::neutral(2, 1).with_axis(0, -0.5),
        ];
        let mut pad = ScriptedPad::new(frames);

        pad.pump();
        assert_eq!(pad.axis(0).unwrap(), 0.5);
        pad.pump();
        assert_eq!(pad.axis(0).unwrap(), -0.5);
        // Last frame repeats
        pad.pump();
        assert_eq!(pad.axis(0).unwrap(), -0.5);
    }

    #[test]
    fn out_of_range_reads_fail() {
        let mut pad = ScriptedPad::new(vec![PadFrame::neutral(2, 1)]);
        pad.pump();
        assert!(matches!(
            pad.axis(5),
            Err(DeviceError::ReadOutOfRange { kind: "axis", .. })
        ));
        assert!(matches!(
            pad.button(9),
            Err(DeviceError::ReadOutOfRange { kind: "button", .. })
        ));
    }
}
