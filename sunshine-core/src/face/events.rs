//! Lifecycle events and the effects they produce

use heapless::Vec;

/// Maximum effects produced by a single event
pub const MAX_EFFECTS: usize = 8;

/// Effects returned from one event
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Notifications from the platform that drive the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    /// Face instantiated
    Create,
    /// Face torn down
    Destroy,
    /// Screen shown or hidden
    VisibilityChanged(bool),
    /// Entered or left ambient (low-power) mode
    AmbientModeChanged(bool),
    /// Hardware properties reported by the platform
    PropertiesChanged { low_bit_ambient: bool },
    /// Screen shape reported by the platform
    WindowInsets { round: bool },
    /// System minute tick
    TimeTick,
    /// Interactive redraw timer fired at wall-clock `now_ms`
    TimerFired { now_ms: i64 },
    /// Time zone changed; offset from UTC in seconds
    TimeZoneChanged { offset_s: i32 },
}

impl LifecycleEvent {
    /// Check if this event comes from a timer rather than the platform
    pub fn is_timer_event(&self) -> bool {
        matches!(self, LifecycleEvent::TimeTick | LifecycleEvent::TimerFired { .. })
    }
}

/// Work the platform must perform on behalf of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Request a redraw
    Invalidate,
    /// Cancel the pending interactive redraw
    CancelTimer,
    /// Schedule one interactive redraw after `delay_ms`
    ArmTimer { delay_ms: u32 },
    /// Start delivering time-zone changes
    RegisterTimeZoneReceiver,
    /// Stop delivering time-zone changes
    UnregisterTimeZoneReceiver,
    /// Re-read the current time zone (it may have changed while hidden)
    RefreshTimeZone,
    /// Open the companion connection
    ConnectCompanion,
    /// Stop forwarding companion change events
    RemoveDataListener,
    /// Close the companion connection
    DisconnectCompanion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_events() {
        assert!(LifecycleEvent::TimeTick.is_timer_event());
        assert!(LifecycleEvent::TimerFired { now_ms: 0 }.is_timer_event());
        assert!(!LifecycleEvent::VisibilityChanged(true).is_timer_event());
        assert!(!LifecycleEvent::TimeZoneChanged { offset_s: 3600 }.is_timer_event());
    }
}
