//! Controller-state source abstraction
//!
//! Two capability paths: enumeration ([`list_devices`]) for listing mode,
//! which needs no injection sink, and a full polling handle ([`PadSource`])
//! acquired by index for the bridge loop.

pub mod gilrs_source;
pub mod scripted;

pub use gilrs_source::{list_devices, GilrsSource};
pub use scripted::{PadFrame, ScriptedPad};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no controller available")]
    NoControllerAvailable,

    #[error("controller index {requested} out of range ({available} detected)")]
    IndexOutOfRange { requested: usize, available: usize },

    #[error("device read error: {kind} index {index} out of range")]
    ReadOutOfRange { kind: &'static str, index: usize },

    #[error("controller disconnected")]
    Disconnected,

    #[error("controller subsystem error: {0}")]
    Subsystem(String),
}

/// A detected controller, as reported by listing mode.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
}

/// Per-tick view of one controller's state.
///
/// `pump` drains pending device events so the subsequent `axis`/`button`
/// reads see a fresh snapshot; reads are bounded, synchronous calls. An
/// out-of-range index is a distinguishable, fatal error.
pub trait PadSource {
    /// Drain pending device events before reading this tick's snapshot.
    fn pump(&mut self);

    /// Boolean pressed state for a button index.
    fn button(&self, index: usize) -> Result<bool, DeviceError>;

    /// Axis value in [-1.0, 1.0] for an axis index.
    fn axis(&self, index: usize) -> Result<f32, DeviceError>;
}
