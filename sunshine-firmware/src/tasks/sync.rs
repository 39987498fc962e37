//! Weather sync task
//!
//! Runs the sync client whenever the companion connects or reports a
//! change, and commits the result to the shared weather store.

use defmt::*;

use sunshine_core::sync::{SyncError, WeatherSync};
use sunshine_core::weather::WeatherSnapshot;

use crate::channels::{SyncEvent, REDRAW, SYNC_EVENTS, WEATHER};
use crate::companion::BridgeLink;

/// Sync task - sole writer of the weather store
#[embassy_executor::task]
pub async fn sync_task(sync: &'static mut WeatherSync, request_timeout_ms: u32) {
    info!("Sync task started ({:?})", sync.policy());

    let mut link = BridgeLink::new(request_timeout_ms);

    loop {
        match SYNC_EVENTS.receive().await {
            SyncEvent::Connected => {
                let outcome = sync.on_connected(&mut link).await;
                if outcome.listening {
                    debug!("Weather listener added");
                } else {
                    warn!("Failed to add weather listener");
                }
                commit(outcome.snapshot).await;
            }
            SyncEvent::DataChanged(event) => match sync.on_data_event(&mut link, &event).await {
                Ok(Some(snapshot)) => commit(Ok(snapshot)).await,
                Ok(None) => trace!("Ignoring unrelated data event"),
                Err(e) => commit(Err(e)).await,
            },
        }
    }
}

/// Store a sync result and request a redraw on success
async fn commit(result: Result<WeatherSnapshot, SyncError>) {
    let mut store = WEATHER.lock().await;
    match store.apply(result) {
        Ok(()) => {
            let snapshot = store.snapshot();
            info!(
                "Weather updated: high={} low={} icon={} (rev {})",
                snapshot.high_temp.as_str(),
                snapshot.low_temp.as_str(),
                snapshot.icon.is_some(),
                store.revision()
            );
            drop(store);
            REDRAW.signal(());
        }
        Err(e) => {
            warn!("Weather sync failed: {:?}", e);
        }
    }
}
