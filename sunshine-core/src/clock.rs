//! Wall clock
//!
//! The watch has no RTC backup, so wall time is a reference pair: a UTC
//! timestamp and the monotonic uptime at which it was valid. The pair is
//! seeded from the build time and replaced whenever the companion sends a
//! time sync.

use chrono::{DateTime, NaiveDateTime, TimeDelta};

/// UTC wall clock anchored to monotonic uptime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// UTC time at the reference point, ms since the UNIX epoch
    epoch_ms: i64,
    /// Monotonic uptime at the reference point, ms
    uptime_ms: u64,
}

impl WallClock {
    /// Anchor `epoch_ms` at `uptime_ms`
    pub const fn new(epoch_ms: i64, uptime_ms: u64) -> Self {
        Self {
            epoch_ms,
            uptime_ms,
        }
    }

    /// Re-anchor the clock
    pub fn sync(&mut self, epoch_ms: i64, uptime_ms: u64) {
        self.epoch_ms = epoch_ms;
        self.uptime_ms = uptime_ms;
    }

    /// UTC time at `uptime_ms`, in ms since the UNIX epoch
    ///
    /// Uptime earlier than the reference (not expected with a monotonic
    /// source) yields times before the reference.
    pub fn now_ms(&self, uptime_ms: u64) -> i64 {
        let elapsed = uptime_ms as i64 - self.uptime_ms as i64;
        self.epoch_ms.saturating_add(elapsed)
    }

    /// Local civil time at `uptime_ms` for the given UTC offset
    pub fn local_time(&self, uptime_ms: u64, utc_offset_s: i32) -> NaiveDateTime {
        let utc = DateTime::from_timestamp_millis(self.now_ms(uptime_ms))
            .map(|dt| dt.naive_utc())
            .unwrap_or_default();
        utc.checked_add_signed(TimeDelta::seconds(utc_offset_s as i64))
            .unwrap_or(utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    // 2026-10-17 09:41:07.250 UTC
    const REF_MS: i64 = 1_792_230_067_250;

    #[test]
    fn test_now_advances_with_uptime() {
        let clock = WallClock::new(REF_MS, 5_000);
        assert_eq!(clock.now_ms(5_000), REF_MS);
        assert_eq!(clock.now_ms(6_750), REF_MS + 1_750);
    }

    #[test]
    fn test_sync_reanchors() {
        let mut clock = WallClock::new(0, 0);
        clock.sync(REF_MS, 120_000);
        assert_eq!(clock.now_ms(121_000), REF_MS + 1_000);
    }

    #[test]
    fn test_local_time_utc() {
        let clock = WallClock::new(REF_MS, 0);
        let t = clock.local_time(0, 0);
        assert_eq!((t.year(), t.month(), t.day()), (2026, 10, 17));
        assert_eq!((t.hour(), t.minute(), t.second()), (9, 41, 7));
    }

    #[test]
    fn test_local_time_offset_crosses_midnight() {
        let clock = WallClock::new(REF_MS, 0);
        // UTC-10 puts the local date on the previous day
        let t = clock.local_time(0, -10 * 3600);
        assert_eq!((t.month(), t.day(), t.hour()), (10, 16, 23));
    }
}
