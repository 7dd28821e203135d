//! Latch state tracker
//!
//! Tracks which virtual inputs this process currently holds down, and
//! forwards exactly one sink event per real transition. Pressing an
//! already-held input (or releasing an idle one) is a no-op, so the OS
//! never sees a duplicate down or up event. `all_held` feeds the cleanup
//! path that releases everything before the process exits.

use crate::backend::{KeyboardBackend, MouseBackend, MouseButton};
use crate::mapping::keys::Key;
use log::{trace, warn};
use std::collections::HashSet;

/// A synthetic input identity, distinct from the physical control driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualInput {
    Key(Key),
    Mouse(MouseButton),
}

/// Registry of currently-held virtual inputs.
#[derive(Debug, Default)]
pub struct LatchTracker {
    held: HashSet<VirtualInput>,
}

impl LatchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press an input. Returns true iff this call transitioned it from
    /// released to held; the sink is invoked only on that transition.
    pub fn press<K, M>(&mut self, input: VirtualInput, keyboard: &K, mouse: &M) -> bool
    where
        K: KeyboardBackend,
        M: MouseBackend,
    {
        if !self.held.insert(input) {
            return false;
        }
        trace!("latch down: {:?}", input);
        let result = match input {
            VirtualInput::Key(key) => keyboard.key_down(key),
            VirtualInput::Mouse(button) => mouse.button_down(button),
        };
        if let Err(e) = result {
            warn!("Failed to press {:?}: {}", input, e);
        }
        true
    }

    /// Release an input. Returns true iff this call transitioned it from
    /// held to released; the sink is invoked only on that transition.
    pub fn release<K, M>(&mut self, input: VirtualInput, keyboard: &K, mouse: &M) -> bool
    where
        K: KeyboardBackend,
        M: MouseBackend,
    {
        if !self.held.remove(&input) {
            return false;
        }
        trace!("latch up: {:?}", input);
        let result = match input {
            VirtualInput::Key(key) => keyboard.key_up(key),
            VirtualInput::Mouse(button) => mouse.button_up(button),
        };
        if let Err(e) = result {
            warn!("Failed to release {:?}: {}", input, e);
        }
        true
    }

    /// Enumerate everything currently held. No ordering guarantee.
    pub fn all_held(&self) -> Vec<VirtualInput> {
        self.held.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release every held input. Used by the draining path on every exit
    /// route, so a crash never leaves a phantom key stuck down.
    pub fn release_all<K, M>(&mut self, keyboard: &K, mouse: &M)
    where
        K: KeyboardBackend,
        M: MouseBackend,
    {
        for input in self.all_held() {
            self.release(input, keyboard, mouse);
        }
    }
}
