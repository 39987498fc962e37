//! Platform abstraction traits
//!
//! These traits define the interface between the watch face logic
//! and the transport that reaches the companion phone.

pub mod companion;

pub use companion::{CompanionChannel, ItemResult};
