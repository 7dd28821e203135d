//! padbridge: game controller to keyboard/mouse bridge
//!
//! Continuously reads a controller's axes and buttons and re-emits them as
//! synthetic keyboard and mouse events, so the controller drives software
//! that has no native controller support. Guarantees that no virtual input
//! is left stuck pressed when the bridge stops, on any exit path.

pub mod backend;
pub mod bridge;
pub mod device;
pub mod mapping;

// Re-export commonly used items
pub use backend::{KeyboardBackend, MouseBackend, MouseButton};
pub use bridge::{Bridge, BridgeError, DEFAULT_TICK_INTERVAL};
pub use device::{list_devices, DeviceError, GilrsSource, PadSource};
pub use mapping::{resolve_key, Key, LatchTracker, Layout, TranslationEngine, VirtualInput};
