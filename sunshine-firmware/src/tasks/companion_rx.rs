//! Companion UART receive task
//!
//! Receives frames from the bridge and dispatches them: query responses to
//! the link, connection and change events to the sync task, clock updates
//! to the wall clock and the controller.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Instant;
use embedded_io_async::Read;

use sunshine_core::face::LifecycleEvent;
use sunshine_protocol::{CompanionMessage, FrameParser};

use crate::channels::{post, SyncEvent, CLOCK, LATEST_TZ, RESPONSES, SYNC_EVENTS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Companion RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn companion_rx_task(mut rx: BufferedUartRx) {
    info!("Companion RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match CompanionMessage::from_frame(&frame) {
                            Ok(msg) => handle_message(msg),
                            Err(e) => {
                                warn!("Failed to parse companion message: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?} ({} dropped)", e, parser.dropped());
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed companion message
fn handle_message(msg: CompanionMessage) {
    match msg {
        CompanionMessage::Connected => {
            info!("Companion connected");
            send_sync(SyncEvent::Connected);
        }
        CompanionMessage::ConnectionSuspended => {
            info!("Companion connection suspended");
        }
        CompanionMessage::ConnectionFailed => {
            warn!("Companion connection failed");
        }
        CompanionMessage::DataChanged(event) => {
            debug!("Data changed: {:?}", event.kind);
            send_sync(SyncEvent::DataChanged(event));
        }
        CompanionMessage::TimeSync { epoch_ms } => {
            let uptime = Instant::now().as_millis();
            CLOCK.lock(|clock| {
                let mut c = clock.get();
                c.sync(epoch_ms, uptime);
                clock.set(c);
            });
            debug!("Clock synced: {}", epoch_ms);
            post(LifecycleEvent::TimeTick);
        }
        CompanionMessage::TimeZone { offset_s } => {
            LATEST_TZ.store(offset_s, Ordering::Relaxed);
            post(LifecycleEvent::TimeZoneChanged { offset_s });
        }
        CompanionMessage::Pong => {
            trace!("PONG received");
        }
        response @ (CompanionMessage::Peers { .. }
        | CompanionMessage::Item { .. }
        | CompanionMessage::AssetChunk { .. }) => {
            // Nobody waiting means the request already timed out
            if RESPONSES.try_send(response).is_err() {
                warn!("Response channel full, dropping response");
            }
        }
    }
}

fn send_sync(event: SyncEvent) {
    if SYNC_EVENTS.try_send(event).is_err() {
        warn!("Sync channel full, dropping event");
    }
}
