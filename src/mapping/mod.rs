//! Layout, key resolution, latch tracking, and the per-tick engine.

pub mod engine;
pub mod keys;
pub mod latch;
pub mod layout;

pub use engine::{TickOutcome, TranslationEngine};
pub use keys::{resolve_key, Key, KeyError};
pub use latch::{LatchTracker, VirtualInput};
pub use layout::{Layout, LayoutError};
