//! Redraw scheduling
//!
//! Decides when the face must be redrawn. Interactive mode redraws on every
//! wall-clock second; ambient mode relies on the system minute tick.

pub mod redraw;

pub use redraw::{delay_to_next_tick, should_run, RedrawTimer, TimerCommand, INTERACTIVE_UPDATE_RATE_MS};
