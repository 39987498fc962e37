//! Watch face controller
//!
//! All redraw, timer and companion-connection behavior is a function of the
//! current display state and a lifecycle event.

use super::events::{Effect, Effects, LifecycleEvent};
use crate::scheduler::{RedrawTimer, TimerCommand};

/// Rendering mode derived from the display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceMode {
    /// Reduced-fidelity rendering (no seconds, date or weather)
    pub ambient: bool,
    /// Draw text with intermediate color levels
    pub antialias: bool,
    /// Round screen layout
    pub round: bool,
    /// Offset from UTC applied to the wall clock, in seconds
    pub utc_offset_s: i32,
}

/// Watch face display state and lifecycle handling
#[derive(Debug, Clone)]
pub struct WatchFace {
    visible: bool,
    ambient: bool,
    /// Display has fewer color bits in ambient mode
    low_bit_ambient: bool,
    round: bool,
    time_zone_registered: bool,
    utc_offset_s: i32,
    timer: RedrawTimer,
}

impl Default for WatchFace {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchFace {
    /// Create a hidden, interactive, square face
    pub const fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            round: false,
            time_zone_registered: false,
            utc_offset_s: 0,
            timer: RedrawTimer::new(),
        }
    }

    /// Check if the face is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the face is in ambient mode
    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Check if time-zone changes are currently delivered
    pub fn is_time_zone_registered(&self) -> bool {
        self.time_zone_registered
    }

    /// Check if the interactive redraw timer is pending
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_armed()
    }

    /// Current rendering mode
    pub fn mode(&self) -> FaceMode {
        FaceMode {
            ambient: self.ambient,
            antialias: !(self.ambient && self.low_bit_ambient),
            round: self.round,
            utc_offset_s: self.utc_offset_s,
        }
    }

    /// Process a lifecycle event and return the resulting effects
    pub fn handle(&mut self, event: LifecycleEvent) -> Effects {
        let mut effects = Effects::new();

        match event {
            LifecycleEvent::Create => {
                *self = Self::new();
            }
            LifecycleEvent::Destroy => {
                push_timer(&mut effects, self.timer.cancel());
                if self.time_zone_registered {
                    self.time_zone_registered = false;
                    push(&mut effects, Effect::UnregisterTimeZoneReceiver);
                }
                push(&mut effects, Effect::RemoveDataListener);
                push(&mut effects, Effect::DisconnectCompanion);
                self.visible = false;
            }
            LifecycleEvent::VisibilityChanged(visible) => {
                self.visible = visible;
                if visible {
                    if !self.time_zone_registered {
                        self.time_zone_registered = true;
                        push(&mut effects, Effect::RegisterTimeZoneReceiver);
                    }
                    push(&mut effects, Effect::ConnectCompanion);
                    push(&mut effects, Effect::RefreshTimeZone);
                } else {
                    if self.time_zone_registered {
                        self.time_zone_registered = false;
                        push(&mut effects, Effect::UnregisterTimeZoneReceiver);
                    }
                    push(&mut effects, Effect::RemoveDataListener);
                    push(&mut effects, Effect::DisconnectCompanion);
                }
                self.update_timer(&mut effects);
            }
            LifecycleEvent::AmbientModeChanged(ambient) => {
                if self.ambient != ambient {
                    self.ambient = ambient;
                    push(&mut effects, Effect::Invalidate);
                }
                self.update_timer(&mut effects);
            }
            LifecycleEvent::PropertiesChanged { low_bit_ambient } => {
                self.low_bit_ambient = low_bit_ambient;
            }
            LifecycleEvent::WindowInsets { round } => {
                self.round = round;
            }
            LifecycleEvent::TimeTick => {
                push(&mut effects, Effect::Invalidate);
            }
            LifecycleEvent::TimerFired { now_ms } => {
                push(&mut effects, Effect::Invalidate);
                if let Some(cmd) = self.timer.fired(self.visible, self.ambient, now_ms) {
                    push_timer(&mut effects, cmd);
                }
            }
            LifecycleEvent::TimeZoneChanged { offset_s } => {
                // Changes arriving while unregistered are dropped; the
                // refresh on the next show picks up the current zone.
                if self.time_zone_registered && self.utc_offset_s != offset_s {
                    self.utc_offset_s = offset_s;
                    push(&mut effects, Effect::Invalidate);
                }
            }
        }

        effects
    }

    /// Start or stop the interactive timer to match the current state
    fn update_timer(&mut self, effects: &mut Effects) {
        let (cancel, arm) = self.timer.update(self.visible, self.ambient);
        push_timer(effects, cancel);
        if let Some(arm) = arm {
            push_timer(effects, arm);
        }
    }
}

fn push(effects: &mut Effects, effect: Effect) {
    // Capacity covers the largest transition
    let _ = effects.push(effect);
}

fn push_timer(effects: &mut Effects, cmd: TimerCommand) {
    push(
        effects,
        match cmd {
            TimerCommand::Cancel => Effect::CancelTimer,
            TimerCommand::Arm { delay_ms } => Effect::ArmTimer { delay_ms },
        },
    );
}
