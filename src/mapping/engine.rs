//! Translation engine - the per-tick mapping core
//!
//! Reads one snapshot of axis and button state from the controller source,
//! applies the layout's deadzone/threshold policy, and drives the latch
//! tracker and the injection sink: discrete movement keys, continuous
//! mouse look, trigger mouse buttons, face-button keys, and the exit
//! condition.

use crate::backend::{KeyboardBackend, MouseBackend};
use crate::device::{DeviceError, PadSource};
use crate::mapping::latch::{LatchTracker, VirtualInput};
use crate::mapping::layout::{Layout, TriggerConfig};
use log::warn;
use std::collections::HashSet;

/// What the lifecycle controller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Exit,
}

/// Per-tick translator from controller state to virtual input.
pub struct TranslationEngine<K, M>
where
    K: KeyboardBackend,
    M: MouseBackend,
{
    layout: Layout,
    keyboard: K,
    mouse: M,
    latch: LatchTracker,
    /// Physical buttons currently down, for edge-triggered key bindings.
    buttons_down: HashSet<usize>,
}

impl<K, M> TranslationEngine<K, M>
where
    K: KeyboardBackend,
    M: MouseBackend,
{
    pub fn new(layout: Layout, keyboard: K, mouse: M) -> Self {
        Self {
            layout,
            keyboard,
            mouse,
            latch: LatchTracker::new(),
            buttons_down: HashSet::new(),
        }
    }

    /// Run one tick against a fresh controller snapshot.
    ///
    /// A failed read is fatal and propagates; the caller is responsible
    /// for draining held inputs afterwards.
    pub fn tick<S: PadSource>(&mut self, pad: &S) -> Result<TickOutcome, DeviceError> {
        self.apply_movement(pad)?;
        self.apply_look(pad)?;
        self.apply_trigger(pad, self.layout.left_trigger.clone())?;
        self.apply_trigger(pad, self.layout.right_trigger.clone())?;
        self.apply_buttons(pad)?;

        if pad.button(self.layout.exit_button)? {
            return Ok(TickOutcome::Exit);
        }
        Ok(TickOutcome::Continue)
    }

    /// Discrete pad: each axis drives a key pair with a single-sided
    /// threshold test (no hysteresis), evaluated independently per axis
    /// so diagonals press two keys at once.
    fn apply_movement<S: PadSource>(&mut self, pad: &S) -> Result<(), DeviceError> {
        let m = &self.layout.movement;
        let threshold = m.threshold;
        let pairs = [
            (m.x_axis, m.neg_x, m.pos_x),
            (m.y_axis, m.neg_y, m.pos_y),
        ];
        for (axis, neg, pos) in pairs {
            let value = pad.axis(axis)?;
            let (neg, pos) = (VirtualInput::Key(neg), VirtualInput::Key(pos));
            if value <= -threshold {
                self.latch.press(neg, &self.keyboard, &self.mouse);
                self.latch.release(pos, &self.keyboard, &self.mouse);
            } else if value >= threshold {
                self.latch.press(pos, &self.keyboard, &self.mouse);
                self.latch.release(neg, &self.keyboard, &self.mouse);
            } else {
                self.latch.release(neg, &self.keyboard, &self.mouse);
                self.latch.release(pos, &self.keyboard, &self.mouse);
            }
        }
        Ok(())
    }

    /// Look pad: axis values inside the deadzone on both axes produce no
    /// event at all; otherwise deltas truncate independently per axis and
    /// a move is emitted only if one survives truncation.
    fn apply_look<S: PadSource>(&mut self, pad: &S) -> Result<(), DeviceError> {
        let look = &self.layout.look;
        let x = pad.axis(look.x_axis)?;
        let y = pad.axis(look.y_axis)?;

        if x.abs() < look.deadzone && y.abs() < look.deadzone {
            return Ok(());
        }

        let dx = (x * look.sensitivity) as i32;
        let dy = (y * look.sensitivity) as i32;
        if dx != 0 || dy != 0 {
            if let Err(e) = self.mouse.move_relative(dx, dy) {
                warn!("Failed to move mouse: {}", e);
            }
        }
        Ok(())
    }

    /// Trigger: a single threshold gates both engage and disengage.
    fn apply_trigger<S: PadSource>(
        &mut self,
        pad: &S,
        trigger: TriggerConfig,
    ) -> Result<(), DeviceError> {
        let value = pad.axis(trigger.axis)?;
        let input = VirtualInput::Mouse(trigger.button);
        if value >= trigger.threshold {
            self.latch.press(input, &self.keyboard, &self.mouse);
        } else {
            self.latch.release(input, &self.keyboard, &self.mouse);
        }
        Ok(())
    }

    /// Digital buttons: edge-triggered through a per-button held set.
    fn apply_buttons<S: PadSource>(&mut self, pad: &S) -> Result<(), DeviceError> {
        for binding in self.layout.bindings.clone() {
            let pressed = pad.button(binding.button)?;
            let input = VirtualInput::Key(binding.key);
            if pressed {
                if self.buttons_down.insert(binding.button) {
                    self.latch.press(input, &self.keyboard, &self.mouse);
                }
            } else if self.buttons_down.remove(&binding.button) {
                self.latch.release(input, &self.keyboard, &self.mouse);
            }
        }
        Ok(())
    }

    /// Everything the engine currently holds down.
    pub fn all_held(&self) -> Vec<VirtualInput> {
        self.latch.all_held()
    }

    /// Release every held virtual input. Safe to call on any exit path.
    pub fn release_all(&mut self) {
        self.latch.release_all(&self.keyboard, &self.mouse);
        self.buttons_down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MouseButton, Recorder, RecordingKeyboard, RecordingMouse, SinkEvent};
    use crate::device::{PadFrame, ScriptedPad};
    use crate::mapping::keys::Key;

    fn engine(
        recorder: &Recorder,
    ) -> TranslationEngine<RecordingKeyboard, RecordingMouse> {
        let layout = Layout::load(None).unwrap();
        TranslationEngine::new(layout, recorder.keyboard(), recorder.mouse())
    }

    fn pad_with(frame: PadFrame) -> ScriptedPad {
        let mut pad = ScriptedPad::new(vec![frame]);
        pad.pump();
        pad
    }

    fn neutral() -> PadFrame {
        PadFrame::neutral(6, 8)
    }

    #[test]
    fn threshold_symmetry_on_movement_axis() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        // v just above +threshold presses the positive key (d)
        let pad = pad_with(neutral().with_axis(0, 0.46));
        engine.tick(&pad).unwrap();
        assert!(recorder
            .take()
            .contains(&SinkEvent::KeyDown(Key::Char('d'))));

        // back to center releases it
        let pad = pad_with(neutral());
        engine.tick(&pad).unwrap();
        assert_eq!(recorder.take(), vec![SinkEvent::KeyUp(Key::Char('d'))]);

        // exactly -threshold presses the negative key (a)
        let pad = pad_with(neutral().with_axis(0, -0.45));
        engine.tick(&pad).unwrap();
        assert!(recorder
            .take()
            .contains(&SinkEvent::KeyDown(Key::Char('a'))));
    }

    #[test]
    fn diagonal_presses_two_keys() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        let pad = pad_with(neutral().with_axis(0, 0.9).with_axis(1, -0.9));
        engine.tick(&pad).unwrap();
        let events = recorder.events();
        assert!(events.contains(&SinkEvent::KeyDown(Key::Char('d'))));
        assert!(events.contains(&SinkEvent::KeyDown(Key::Char('w'))));
    }

    #[test]
    fn holding_direction_emits_no_duplicate_downs() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        for _ in 0..3 {
            let pad = pad_with(neutral().with_axis(0, 0.8));
            engine.tick(&pad).unwrap();
        }
        let downs = recorder
            .events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::KeyDown(_)))
            .count();
        assert_eq!(downs, 1);
    }

    #[test]
    fn deadzone_gates_mouse_motion() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        // Inside deadzone on both axes: no event at all, not even (0, 0)
        let pad = pad_with(neutral().with_axis(2, 0.05));
        engine.tick(&pad).unwrap();
        assert!(recorder.take().is_empty());

        // 0.2 * 18.0 truncates to 3
        let pad = pad_with(neutral().with_axis(2, 0.2));
        engine.tick(&pad).unwrap();
        assert_eq!(recorder.take(), vec![SinkEvent::MouseMove { dx: 3, dy: 0 }]);
    }

    #[test]
    fn negative_look_axis_truncates_toward_zero() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        let pad = pad_with(neutral().with_axis(3, -0.2));
        engine.tick(&pad).unwrap();
        assert_eq!(
            recorder.take(),
            vec![SinkEvent::MouseMove { dx: 0, dy: -3 }]
        );
    }

    #[test]
    fn trigger_threshold_maps_to_mouse_button() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        // 0.49 is below the 0.5 threshold
        let pad = pad_with(neutral().with_axis(4, 0.49));
        engine.tick(&pad).unwrap();
        assert!(recorder.take().is_empty());

        // exactly at threshold engages
        let pad = pad_with(neutral().with_axis(4, 0.5));
        engine.tick(&pad).unwrap();
        assert_eq!(
            recorder.take(),
            vec![SinkEvent::ButtonDown(MouseButton::Left)]
        );

        // dropping below releases
        let pad = pad_with(neutral().with_axis(4, 0.3));
        engine.tick(&pad).unwrap();
        assert_eq!(recorder.take(), vec![SinkEvent::ButtonUp(MouseButton::Left)]);
    }

    #[test]
    fn right_trigger_maps_to_secondary_button() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        let pad = pad_with(neutral().with_axis(5, 0.9));
        engine.tick(&pad).unwrap();
        assert_eq!(
            recorder.take(),
            vec![SinkEvent::ButtonDown(MouseButton::Right)]
        );
    }

    #[test]
    fn face_buttons_are_edge_triggered() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        // a (index 0) held for two ticks: one down
        for _ in 0..2 {
            let pad = pad_with(neutral().with_button(0, true));
            engine.tick(&pad).unwrap();
        }
        assert_eq!(recorder.take(), vec![SinkEvent::KeyDown(Key::Space)]);

        // released: one up
        let pad = pad_with(neutral());
        engine.tick(&pad).unwrap();
        assert_eq!(recorder.take(), vec![SinkEvent::KeyUp(Key::Space)]);
    }

    #[test]
    fn exit_button_signals_exit() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        let pad = pad_with(neutral());
        assert_eq!(engine.tick(&pad).unwrap(), TickOutcome::Continue);

        let pad = pad_with(neutral().with_button(6, true));
        assert_eq!(engine.tick(&pad).unwrap(), TickOutcome::Exit);
    }

    #[test]
    fn out_of_range_read_is_fatal() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        // Frame too short for the configured axes
        let pad = pad_with(PadFrame::neutral(2, 8));
        assert!(matches!(
            engine.tick(&pad),
            Err(DeviceError::ReadOutOfRange { .. })
        ));
    }

    #[test]
    fn release_all_drains_everything() {
        let recorder = Recorder::new();
        let mut engine = engine(&recorder);

        let pad = pad_with(
            neutral()
                .with_axis(0, 0.9)
                .with_axis(4, 0.9)
                .with_button(0, true),
        );
        engine.tick(&pad).unwrap();
        assert_eq!(engine.all_held().len(), 3);

        engine.release_all();
        assert!(engine.all_held().is_empty());
    }
}
