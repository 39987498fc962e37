//! Timer tasks
//!
//! - Interactive redraw timer, armed and cancelled by the controller
//! - Minute tick, aligned to the wall clock, standing in for the system
//!   time-tick broadcast

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use sunshine_core::face::LifecycleEvent;
use sunshine_core::scheduler::TimerCommand;

use crate::channels::{now_ms, post, TIMER_CMD};

/// Milliseconds per minute
const MINUTE_MS: i64 = 60_000;

/// Redraw timer task - one pending firing at a time
#[embassy_executor::task]
pub async fn redraw_timer_task() {
    info!("Redraw timer task started");

    let mut pending: Option<u32> = None;

    loop {
        let cmd = match pending {
            None => TIMER_CMD.wait().await,
            Some(delay_ms) => {
                match select(Timer::after_millis(delay_ms as u64), TIMER_CMD.wait()).await {
                    Either::First(()) => {
                        pending = None;
                        post(LifecycleEvent::TimerFired { now_ms: now_ms() });
                        continue;
                    }
                    Either::Second(cmd) => cmd,
                }
            }
        };

        // A new command always replaces the pending firing
        pending = match cmd {
            TimerCommand::Cancel => None,
            TimerCommand::Arm { delay_ms } => Some(delay_ms),
        };
    }
}

/// Minute tick task - posts `TimeTick` at each wall-clock minute
#[embassy_executor::task]
pub async fn minute_tick_task() {
    info!("Minute tick task started");

    loop {
        let into_minute = now_ms().rem_euclid(MINUTE_MS);
        Timer::after_millis((MINUTE_MS - into_minute) as u64).await;
        trace!("Minute tick");
        post(LifecycleEvent::TimeTick);
    }
}
