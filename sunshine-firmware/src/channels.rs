//! Inter-task communication channels
//!
//! Defines the static channels and shared state used between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicI32;

use sunshine_core::clock::WallClock;
use sunshine_core::face::{FaceMode, LifecycleEvent};
use sunshine_core::scheduler::TimerCommand;
use sunshine_core::weather::WeatherStore;
use sunshine_protocol::{CompanionMessage, DataEvent, WatchMessage};

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// Channel capacity for lifecycle events
const LIFECYCLE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outgoing companion messages
const OUTBOX_SIZE: usize = 4;

/// Channel capacity for query responses
const RESPONSE_CHANNEL_SIZE: usize = 2;

/// Channel capacity for sync events
const SYNC_CHANNEL_SIZE: usize = 4;

/// Work for the sync task
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEvent {
    /// Data-layer connection established
    Connected,
    /// Change notification from the phone
    DataChanged(DataEvent),
}

/// Lifecycle events for the face controller
pub static LIFECYCLE: Channel<CriticalSectionRawMutex, LifecycleEvent, LIFECYCLE_CHANNEL_SIZE> =
    Channel::new();

/// Interactive redraw timer command (updated by controller)
pub static TIMER_CMD: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// Signal that the face must be redrawn
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Rendering mode of the last controller update
pub static FACE_MODE: BlockingMutex<CriticalSectionRawMutex, Cell<FaceMode>> =
    BlockingMutex::new(Cell::new(FaceMode {
        ambient: false,
        antialias: true,
        round: false,
        utc_offset_s: 0,
    }));

/// Messages queued for the companion bridge
pub static OUTBOX: Channel<CriticalSectionRawMutex, WatchMessage, OUTBOX_SIZE> = Channel::new();

/// Query responses from the companion bridge
pub static RESPONSES: Channel<CriticalSectionRawMutex, CompanionMessage, RESPONSE_CHANNEL_SIZE> =
    Channel::new();

/// Connection and change events for the sync task
pub static SYNC_EVENTS: Channel<CriticalSectionRawMutex, SyncEvent, SYNC_CHANNEL_SIZE> =
    Channel::new();

/// Latest time zone offset reported by the phone, in seconds
pub static LATEST_TZ: AtomicI32 = AtomicI32::new(0);

/// UTC wall clock, seeded from the build time until the phone syncs it
pub static CLOCK: BlockingMutex<CriticalSectionRawMutex, Cell<WallClock>> =
    BlockingMutex::new(Cell::new(WallClock::new(BUILD_EPOCH_MS, 0)));

/// Latest weather snapshot (written only by the sync task)
pub static WEATHER: Mutex<CriticalSectionRawMutex, WeatherStore> = Mutex::new(WeatherStore::new());

/// Current UTC time in ms since the UNIX epoch
pub fn now_ms() -> i64 {
    let uptime = embassy_time::Instant::now().as_millis();
    CLOCK.lock(|clock| clock.get().now_ms(uptime))
}

/// Queue a lifecycle event, dropping it if the controller is backed up
pub fn post(event: LifecycleEvent) {
    if LIFECYCLE.try_send(event).is_err() {
        defmt::warn!("Lifecycle channel full, dropping {:?}", event);
    }
}
