//! Board-agnostic core logic for the Sunshine watch face
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Watch face controller driven by lifecycle events
//! - Redraw timer rules (second-aligned interactive refresh)
//! - Wall clock and time/date formatting
//! - Weather snapshot and icon decoding
//! - Companion sync client and the channel trait it talks through
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod face;
pub mod format;
pub mod scheduler;
pub mod sync;
pub mod traits;
pub mod weather;
