//! Companion UART transmit task
//!
//! Sends queued watch messages and a periodic heartbeat to the bridge.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use sunshine_protocol::WatchMessage;

use crate::channels::OUTBOX;

/// Heartbeat interval
const PING_INTERVAL_MS: u64 = 5000;

/// Companion TX task - sends frames to the bridge
#[embassy_executor::task]
pub async fn companion_tx_task(mut tx: BufferedUartTx) {
    info!("Companion TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(PING_INTERVAL_MS));

    loop {
        let msg = match select(OUTBOX.receive(), ticker.next()).await {
            Either::First(msg) => msg,
            Either::Second(()) => WatchMessage::Ping,
        };
        send(&mut tx, &msg).await;
    }
}

/// Encode and write one message
async fn send(tx: &mut BufferedUartTx, msg: &WatchMessage) {
    let frame = match msg.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode {:?}: {:?}", msg, e);
            return;
        }
    };

    match frame.encode_to_vec() {
        Ok(bytes) => {
            if let Err(e) = tx.write_all(&bytes).await {
                warn!("Failed to send frame: {:?}", e);
            } else {
                trace!("TX: type {:#x}, {} bytes", frame.msg_type, bytes.len());
            }
        }
        Err(e) => {
            warn!("Failed to encode frame: {:?}", e);
        }
    }
}
