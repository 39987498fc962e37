//! Face controller task
//!
//! Owns the watch face state. Lifecycle events from the input, timer and
//! companion tasks go through `WatchFace::handle`; the returned effects
//! are carried out here.

use core::sync::atomic::Ordering;

use defmt::*;

use sunshine_core::config::ScreenConfig;
use sunshine_core::face::{Effect, Effects, LifecycleEvent, WatchFace};
use sunshine_core::scheduler::TimerCommand;
use sunshine_protocol::WatchMessage;

use crate::channels::{FACE_MODE, LATEST_TZ, LIFECYCLE, OUTBOX, REDRAW, TIMER_CMD};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(screen: ScreenConfig) {
    info!("Controller task started");

    let mut face = WatchFace::new();

    // Platform bring-up: the face is created, learns the panel, then shown
    let startup = [
        LifecycleEvent::Create,
        LifecycleEvent::PropertiesChanged {
            low_bit_ambient: screen.low_bit_ambient,
        },
        LifecycleEvent::WindowInsets {
            round: screen.round,
        },
        LifecycleEvent::VisibilityChanged(true),
    ];
    for event in startup {
        handle(&mut face, event).await;
    }

    loop {
        let event = LIFECYCLE.receive().await;
        if event.is_timer_event() {
            trace!("Event: {:?}", event);
        } else {
            debug!("Event: {:?}", event);
        }
        handle(&mut face, event).await;
    }
}

async fn handle(face: &mut WatchFace, event: LifecycleEvent) {
    let effects = face.handle(event);
    publish_mode(face);
    if let Some(followup) = execute(&effects).await {
        let effects = face.handle(followup);
        publish_mode(face);
        execute(&effects).await;
    }
}

/// Share the current mode with the display task
///
/// Insets and panel properties change the mode without invalidating, and
/// the next redraw must still see them.
fn publish_mode(face: &WatchFace) {
    let mode = face.mode();
    FACE_MODE.lock(|m| m.set(mode));
}

/// Carry out `effects` in order
///
/// Returns the event produced by re-reading the time zone, if requested.
async fn execute(effects: &Effects) -> Option<LifecycleEvent> {
    let mut followup = None;

    for effect in effects {
        match *effect {
            Effect::Invalidate => REDRAW.signal(()),
            Effect::CancelTimer => TIMER_CMD.signal(TimerCommand::Cancel),
            Effect::ArmTimer { delay_ms } => TIMER_CMD.signal(TimerCommand::Arm { delay_ms }),
            Effect::RegisterTimeZoneReceiver => debug!("Time zone updates enabled"),
            Effect::UnregisterTimeZoneReceiver => debug!("Time zone updates disabled"),
            Effect::RefreshTimeZone => {
                followup = Some(LifecycleEvent::TimeZoneChanged {
                    offset_s: LATEST_TZ.load(Ordering::Relaxed),
                });
            }
            Effect::ConnectCompanion => {
                info!("Connecting to companion");
                OUTBOX.send(WatchMessage::Connect).await;
            }
            Effect::RemoveDataListener => OUTBOX.send(WatchMessage::RemoveListener).await,
            Effect::DisconnectCompanion => {
                info!("Disconnecting from companion");
                OUTBOX.send(WatchMessage::Disconnect).await;
            }
        }
    }

    followup
}
