//! Interactive redraw timer
//!
//! The timer runs only while the face is visible and interactive. Every
//! firing re-arms for the remainder of the current second so redraws stay
//! on wall-clock second boundaries instead of drifting by the time spent
//! drawing.

/// Update rate in interactive mode (seconds are displayed)
pub const INTERACTIVE_UPDATE_RATE_MS: u32 = 1000;

/// Whether the interactive redraw timer should be running
pub fn should_run(visible: bool, ambient: bool) -> bool {
    visible && !ambient
}

/// Delay from `now_ms` to the next whole second, in `[1, 1000]`
///
/// `now_ms` is wall-clock time in milliseconds since the UNIX epoch.
pub fn delay_to_next_tick(now_ms: i64) -> u32 {
    let rate = INTERACTIVE_UPDATE_RATE_MS as i64;
    (rate - now_ms.rem_euclid(rate)) as u32
}

/// Instruction for the platform timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// Drop any pending firing
    Cancel,
    /// Fire once after `delay_ms` (0 = as soon as possible)
    Arm { delay_ms: u32 },
}

/// Tracks whether a redraw firing is pending
#[derive(Debug, Clone, Default)]
pub struct RedrawTimer {
    armed: bool,
}

impl RedrawTimer {
    /// Create an idle timer
    pub const fn new() -> Self {
        Self { armed: false }
    }

    /// Check if a firing is pending
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Re-evaluate after a visibility or ambient change
    ///
    /// Always cancels the pending firing. If the timer should run, it is
    /// re-armed to fire immediately so the face redraws without waiting
    /// for the next second.
    pub fn update(&mut self, visible: bool, ambient: bool) -> (TimerCommand, Option<TimerCommand>) {
        self.armed = false;
        if should_run(visible, ambient) {
            self.armed = true;
            (TimerCommand::Cancel, Some(TimerCommand::Arm { delay_ms: 0 }))
        } else {
            (TimerCommand::Cancel, None)
        }
    }

    /// Handle a firing at wall-clock `now_ms`
    ///
    /// Returns the re-arm command if the timer should keep running.
    pub fn fired(&mut self, visible: bool, ambient: bool, now_ms: i64) -> Option<TimerCommand> {
        if should_run(visible, ambient) {
            self.armed = true;
            Some(TimerCommand::Arm {
                delay_ms: delay_to_next_tick(now_ms),
            })
        } else {
            self.armed = false;
            None
        }
    }

    /// Drop any pending firing
    pub fn cancel(&mut self) -> TimerCommand {
        self.armed = false;
        TimerCommand::Cancel
    }
}
