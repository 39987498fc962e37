//! Companion sync client
//!
//! Pulls the weather item from the phone when the link comes up and
//! decodes change notifications into fresh snapshots.

pub mod client;

pub use client::{select_peer, ConnectOutcome, WeatherSync};

use crate::weather::IconError;

/// Path of the weather item published by the phone
pub const WEATHER_PATH: &str = "/sunshine";

/// Data map key: high temperature text
pub const KEY_HIGH_TEMP: &str = "HIGH_TEMP";

/// Data map key: low temperature text
pub const KEY_LOW_TEMP: &str = "LOW_TEMP";

/// Data map key: icon asset
pub const KEY_WEATHER_IMG: &str = "WEATHER_IMG";

/// Problems with the contents of a weather item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Key absent from the data map
    MissingKey(&'static str),
    /// Key present with the wrong value type
    WrongType(&'static str),
}

/// Sync failures
///
/// None of these are retried; the caller keeps the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// No peer is connected
    NoPeers,
    /// Link or transport failure, including request timeouts
    Channel,
    /// Lookup failed or no item exists at the URI
    ItemMissing,
    /// Item present but malformed
    Payload(PayloadError),
    /// Icon asset unreadable or not a valid raster
    Asset(IconError),
    /// Peer id does not form a valid item URI
    Uri,
}

impl From<PayloadError> for SyncError {
    fn from(e: PayloadError) -> Self {
        SyncError::Payload(e)
    }
}

impl From<IconError> for SyncError {
    fn from(e: IconError) -> Self {
        SyncError::Asset(e)
    }
}
