//! End-to-end bridge tests against a scripted controller.
//!
//! These drive the full pump -> translate -> inject loop with a recording
//! sink and check the core guarantee: whatever way a run ends, every
//! injected down event has a matching up event by the time `run` returns.

use padbridge::backend::{MouseButton, Recorder, RecordingKeyboard, RecordingMouse, SinkEvent};
use padbridge::bridge::Bridge;
use padbridge::device::scripted::{PadFrame, ScriptedPad};
use padbridge::mapping::keys::Key;
use padbridge::mapping::layout::Layout;
use std::collections::HashMap;
use std::time::Duration;

fn neutral() -> PadFrame {
    PadFrame::neutral(6, 8)
}

fn bridge(recorder: &Recorder) -> Bridge<RecordingKeyboard, RecordingMouse> {
    let layout = Layout::load(None).unwrap();
    Bridge::new(
        layout,
        recorder.keyboard(),
        recorder.mouse(),
        Duration::ZERO,
    )
}

/// Every down event must be balanced by an up event, per input.
fn assert_balanced(events: &[SinkEvent]) {
    let mut open: HashMap<String, i64> = HashMap::new();
    for event in events {
        match event {
            SinkEvent::KeyDown(k) => *open.entry(format!("key {k}")).or_default() += 1,
            SinkEvent::KeyUp(k) => *open.entry(format!("key {k}")).or_default() -= 1,
            SinkEvent::ButtonDown(b) => *open.entry(format!("btn {}", b.as_str())).or_default() += 1,
            SinkEvent::ButtonUp(b) => *open.entry(format!("btn {}", b.as_str())).or_default() -= 1,
            SinkEvent::MouseMove { .. } => {}
        }
    }
    for (input, count) in open {
        assert_eq!(count, 0, "input {input} left unbalanced");
    }
}

#[test]
fn exit_button_run_leaves_nothing_held() {
    let recorder = Recorder::new();
    let mut bridge = bridge(&recorder);

    // Walk forward, aim, fire, then press the exit button while everything
    // is still engaged: draining must release it all.
    let mut pad = ScriptedPad::new(vec![
        neutral().with_axis(1, -0.9),
        neutral().with_axis(1, -0.9).with_axis(2, 0.5),
        neutral()
            .with_axis(1, -0.9)
            .with_axis(4, 0.8)
            .with_button(0, true),
        neutral()
            .with_axis(1, -0.9)
            .with_axis(4, 0.8)
            .with_button(0, true)
            .with_button(6, true),
    ]);

    bridge.run(&mut pad).unwrap();

    let events = recorder.events();
    assert!(events.contains(&SinkEvent::KeyDown(Key::Char('w'))));
    assert!(events.contains(&SinkEvent::ButtonDown(MouseButton::Left)));
    assert!(events.contains(&SinkEvent::KeyDown(Key::Space)));
    assert_balanced(&events);
    assert!(bridge.held_inputs().is_empty());
}

#[test]
fn fatal_read_error_still_drains() {
    let recorder = Recorder::new();
    let mut bridge = bridge(&recorder);

    // Hold movement and a trigger, then present a frame too short for the
    // configured axes: the tick fails, but cleanup must still run.
    let mut pad = ScriptedPad::new(vec![
        neutral().with_axis(0, 0.9).with_axis(5, 0.9),
        PadFrame::neutral(2, 8),
    ]);

    let result = bridge.run(&mut pad);
    assert!(result.is_err());

    let events = recorder.events();
    assert!(events.contains(&SinkEvent::KeyDown(Key::Char('d'))));
    assert!(events.contains(&SinkEvent::ButtonDown(MouseButton::Right)));
    assert_balanced(&events);
    assert!(bridge.held_inputs().is_empty());
}

#[test]
fn oscillating_axis_alternates_press_release() {
    let recorder = Recorder::new();
    let mut bridge = bridge(&recorder);

    // Single-sided threshold: crossing in and out presses and releases
    // each time, with strict down/up alternation for the key.
    let mut pad = ScriptedPad::new(vec![
        neutral().with_axis(0, 0.8),
        neutral(),
        neutral().with_axis(0, 0.8),
        neutral(),
        neutral().with_button(6, true),
    ]);

    bridge.run(&mut pad).unwrap();

    let d_events: Vec<SinkEvent> = recorder
        .events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                SinkEvent::KeyDown(Key::Char('d')) | SinkEvent::KeyUp(Key::Char('d'))
            )
        })
        .collect();
    assert_eq!(d_events.len(), 4);
    assert!(matches!(d_events[0], SinkEvent::KeyDown(_)));
    assert!(matches!(d_events[1], SinkEvent::KeyUp(_)));
    assert!(matches!(d_events[2], SinkEvent::KeyDown(_)));
    assert!(matches!(d_events[3], SinkEvent::KeyUp(_)));
}

#[test]
fn look_pad_motion_passes_through_without_latching() {
    let recorder = Recorder::new();
    let mut bridge = bridge(&recorder);

    let mut pad = ScriptedPad::new(vec![
        neutral().with_axis(2, 0.2),
        neutral().with_axis(2, 0.2).with_axis(3, 0.5),
        neutral().with_button(6, true),
    ]);

    bridge.run(&mut pad).unwrap();

    let moves: Vec<SinkEvent> = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, SinkEvent::MouseMove { .. }))
        .collect();
    assert_eq!(
        moves,
        vec![
            SinkEvent::MouseMove { dx: 3, dy: 0 },
            SinkEvent::MouseMove { dx: 3, dy: 9 },
        ]
    );
    assert!(bridge.held_inputs().is_empty());
}
