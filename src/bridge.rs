//! Bridge lifecycle controller
//!
//! Owns the polling loop and the cleanup guarantee. The loop runs
//! Idle -> Polling -> Draining -> Stopped: polling repeats
//! pump-translate-sleep at a fixed interval until the exit button fires or
//! a read fails, and draining releases every held virtual input on every
//! exit route before the controller handle is relinquished.

use crate::backend::{KeyboardBackend, MouseBackend};
use crate::device::{DeviceError, PadSource};
use crate::mapping::engine::{TickOutcome, TranslationEngine};
use crate::mapping::layout::{Layout, LayoutError};
use crate::mapping::latch::VirtualInput;
use log::{debug, info, warn};
use std::thread;
use std::time::Duration;

/// Default inter-tick sleep. Trades input latency against CPU usage.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeState {
    Idle,
    Polling,
    Draining,
    Stopped,
}

/// Runtime capabilities bundled at startup: the resolved layout, both
/// injection backends, and the tick interval. The controller source is
/// passed into [`Bridge::run`] so the enumerate-only path never needs one.
pub struct Bridge<K, M>
where
    K: KeyboardBackend,
    M: MouseBackend,
{
    engine: TranslationEngine<K, M>,
    interval: Duration,
    state: BridgeState,
}

impl<K, M> Bridge<K, M>
where
    K: KeyboardBackend,
    M: MouseBackend,
{
    pub fn new(layout: Layout, keyboard: K, mouse: M, interval: Duration) -> Self {
        Self {
            engine: TranslationEngine::new(layout, keyboard, mouse),
            interval,
            state: BridgeState::Idle,
        }
    }

    /// Run the polling loop until the exit button fires or a read fails.
    ///
    /// Draining is unconditional: whatever way the loop ends, every
    /// currently-held virtual input is released before this returns.
    pub fn run<S: PadSource>(&mut self, source: &mut S) -> Result<(), BridgeError> {
        self.transition(BridgeState::Polling);
        info!(
            "Polling at {} ms per tick; press the exit button to stop",
            self.interval.as_millis()
        );

        let outcome = self.poll(source);

        self.transition(BridgeState::Draining);
        let held = self.engine.all_held();
        if !held.is_empty() {
            info!("Releasing {} held input(s)", held.len());
        }
        self.engine.release_all();

        self.transition(BridgeState::Stopped);
        match &outcome {
            Ok(()) => info!("Exit button pressed, bridge stopped cleanly"),
            Err(e) => warn!("Bridge stopped on error: {}", e),
        }
        outcome
    }

    fn poll<S: PadSource>(&mut self, source: &mut S) -> Result<(), BridgeError> {
        loop {
            source.pump();
            match self.engine.tick(source)? {
                TickOutcome::Exit => return Ok(()),
                TickOutcome::Continue => {}
            }
            thread::sleep(self.interval);
        }
    }

    fn transition(&mut self, next: BridgeState) {
        debug!("bridge state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Inputs still held by the engine. Empty after a completed run.
    pub fn held_inputs(&self) -> Vec<VirtualInput> {
        self.engine.all_held()
    }
}
