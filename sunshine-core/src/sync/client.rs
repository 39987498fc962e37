//! Weather sync over a companion channel

use sunshine_protocol::{DataEvent, DataEventKind, DataItem, ItemUri, Peer, PeerList};

use super::{PayloadError, SyncError, KEY_HIGH_TEMP, KEY_LOW_TEMP, KEY_WEATHER_IMG, WEATHER_PATH};
use crate::config::PeerSelection;
use crate::traits::CompanionChannel;
use crate::weather::{IconError, IconImage, TempText, WeatherSnapshot, MAX_ASSET_BYTES};

/// Pick the peer that owns the weather item
pub fn select_peer(policy: PeerSelection, peers: &PeerList) -> Option<&Peer> {
    match policy {
        PeerSelection::LastEnumerated => peers.last(),
        PeerSelection::PreferNearby => peers.iter().find(|p| p.nearby).or_else(|| peers.last()),
    }
}

/// Result of the connect-time sync
#[derive(Debug)]
pub struct ConnectOutcome {
    /// Snapshot fetched on connect
    pub snapshot: Result<WeatherSnapshot, SyncError>,
    /// Whether change notifications were enabled
    pub listening: bool,
}

/// Sync client state
pub struct WeatherSync {
    policy: PeerSelection,
    scratch: [u8; MAX_ASSET_BYTES],
}

impl WeatherSync {
    /// Create a client using `policy` to choose the phone
    pub const fn new(policy: PeerSelection) -> Self {
        Self {
            policy,
            scratch: [0; MAX_ASSET_BYTES],
        }
    }

    /// Peer selection policy in use
    pub fn policy(&self) -> PeerSelection {
        self.policy
    }

    /// Run the connect-time sync: fetch the current item, then subscribe
    ///
    /// The listener is added whether or not the fetch succeeded so later
    /// updates still arrive.
    pub async fn on_connected<C: CompanionChannel>(&mut self, channel: &mut C) -> ConnectOutcome {
        let snapshot = self.fetch_initial(channel).await;
        let listening = channel.add_listener().await.is_ok();
        ConnectOutcome {
            snapshot,
            listening,
        }
    }

    /// Fetch and decode the weather item from the selected peer
    pub async fn fetch_initial<C: CompanionChannel>(
        &mut self,
        channel: &mut C,
    ) -> Result<WeatherSnapshot, SyncError> {
        let peers = channel
            .connected_peers()
            .await
            .map_err(|_| SyncError::Channel)?;
        let peer = select_peer(self.policy, &peers).ok_or(SyncError::NoPeers)?;
        let uri = ItemUri::new(&peer.id, WEATHER_PATH).map_err(|_| SyncError::Uri)?;

        let result = channel
            .get_data_item(&uri)
            .await
            .map_err(|_| SyncError::Channel)?;
        if !result.status.is_success() {
            return Err(SyncError::ItemMissing);
        }
        let item = result.item.ok_or(SyncError::ItemMissing)?;

        self.decode_item(channel, &item).await
    }

    /// Handle a change notification
    ///
    /// Returns `Ok(None)` for events that do not concern the weather item.
    pub async fn on_data_event<C: CompanionChannel>(
        &mut self,
        channel: &mut C,
        event: &DataEvent,
    ) -> Result<Option<WeatherSnapshot>, SyncError> {
        if event.kind != DataEventKind::Changed || !event.item.uri.has_path(WEATHER_PATH) {
            return Ok(None);
        }
        self.decode_item(channel, &event.item).await.map(Some)
    }

    /// Decode an item's temperatures and resolve its icon
    async fn decode_item<C: CompanionChannel>(
        &mut self,
        channel: &mut C,
        item: &DataItem,
    ) -> Result<WeatherSnapshot, SyncError> {
        let high_temp = text(item, KEY_HIGH_TEMP)?;
        let low_temp = text(item, KEY_LOW_TEMP)?;
        let asset = match item.data.get(KEY_WEATHER_IMG) {
            None => return Err(PayloadError::MissingKey(KEY_WEATHER_IMG).into()),
            Some(_) => item
                .data
                .get_asset(KEY_WEATHER_IMG)
                .ok_or(PayloadError::WrongType(KEY_WEATHER_IMG))?,
        };

        let len = channel
            .read_asset(asset, &mut self.scratch)
            .await
            .map_err(|_| IconError::Unavailable)?;
        let icon = IconImage::decode(&self.scratch[..len])?;

        Ok(WeatherSnapshot {
            high_temp,
            low_temp,
            icon: Some(icon),
        })
    }
}

fn text(item: &DataItem, key: &'static str) -> Result<TempText, PayloadError> {
    if item.data.get(key).is_none() {
        return Err(PayloadError::MissingKey(key));
    }
    let value = item.data.get_string(key).ok_or(PayloadError::WrongType(key))?;
    TempText::try_from(value).map_err(|_| PayloadError::WrongType(key))
}
