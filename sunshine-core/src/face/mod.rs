//! Watch face controller
//!
//! Platform lifecycle notifications go in as events; the controller updates
//! its display state and returns the effects the platform must carry out.
//! The controller itself never touches hardware.

pub mod events;
pub mod machine;

pub use events::{Effect, Effects, LifecycleEvent, MAX_EFFECTS};
pub use machine::{FaceMode, WatchFace};
