//! Property tests for the watch face rules

use embassy_futures::block_on;
use proptest::prelude::*;
use sunshine_core::config::PeerSelection;
use sunshine_core::face::{LifecycleEvent, WatchFace};
use sunshine_core::format::time_text;
use sunshine_core::scheduler::delay_to_next_tick;
use sunshine_core::sync::{WeatherSync, KEY_HIGH_TEMP, KEY_LOW_TEMP, KEY_WEATHER_IMG, WEATHER_PATH};
use sunshine_core::traits::{CompanionChannel, ItemResult};
use sunshine_core::weather::{WeatherStore, ICON_MAGIC};
use sunshine_protocol::{Asset, DataItem, DataMap, ItemStatus, ItemUri, Peer, PeerList};

/// Channel serving a fixed weather item from one peer, or no peers at all
struct FixedChannel {
    peers: PeerList,
    item: DataItem,
    color: u16,
}

impl FixedChannel {
    fn new(high: &str, low: &str, color: u16, online: bool) -> Self {
        let mut peers = PeerList::new();
        if online {
            peers.push(Peer::new("phone", "Phone", true).unwrap()).unwrap();
        }
        let mut data = DataMap::new();
        data.put_string(KEY_HIGH_TEMP, high).unwrap();
        data.put_string(KEY_LOW_TEMP, low).unwrap();
        data.put_asset(KEY_WEATHER_IMG, Asset::from_digest("icon").unwrap())
            .unwrap();
        Self {
            peers,
            item: DataItem {
                uri: ItemUri::new("phone", WEATHER_PATH).unwrap(),
                data,
            },
            color,
        }
    }
}

impl CompanionChannel for FixedChannel {
    type Error = ();

    async fn connected_peers(&mut self) -> Result<PeerList, ()> {
        Ok(self.peers.clone())
    }

    async fn get_data_item(&mut self, _uri: &ItemUri) -> Result<ItemResult, ()> {
        Ok(ItemResult {
            status: ItemStatus::Success,
            item: Some(self.item.clone()),
        })
    }

    async fn read_asset(&mut self, _asset: &Asset, buf: &mut [u8]) -> Result<usize, ()> {
        // 1x1 icon
        buf[..4].copy_from_slice(ICON_MAGIC);
        buf[4..6].copy_from_slice(&1u16.to_le_bytes());
        buf[6..8].copy_from_slice(&1u16.to_le_bytes());
        buf[8..10].copy_from_slice(&self.color.to_be_bytes());
        Ok(10)
    }

    async fn add_listener(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

fn temp() -> impl Strategy<Value = String> {
    (-60i32..60).prop_map(|t| format!("{}°", t))
}

proptest! {
    #[test]
    fn time_text_is_unpadded_hour_padded_minute(hour in 0u32..24, minute in 0u32..60) {
        let text = time_text(hour, minute);
        prop_assert_eq!(text.as_str(), format!("{}:{:02}", hour, minute));
    }

    #[test]
    fn delay_lands_on_second_boundary(now_ms in any::<i64>().prop_map(|t| t / 2)) {
        let delay = delay_to_next_tick(now_ms);
        prop_assert!((1..=1000).contains(&delay));
        prop_assert_eq!((now_ms + delay as i64).rem_euclid(1000), 0);
    }

    #[test]
    fn timer_runs_iff_visible_and_interactive(
        events in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..32)
    ) {
        let mut face = WatchFace::new();
        for (is_visibility, value) in events {
            if is_visibility {
                face.handle(LifecycleEvent::VisibilityChanged(value));
            } else {
                face.handle(LifecycleEvent::AmbientModeChanged(value));
            }
            prop_assert_eq!(
                face.is_timer_running(),
                face.is_visible() && !face.is_ambient()
            );
        }
    }

    #[test]
    fn no_peers_keeps_previous_snapshot(high in temp(), low in temp()) {
        let mut sync = WeatherSync::new(PeerSelection::PreferNearby);
        let mut store = WeatherStore::new();

        let mut online = FixedChannel::new(&high, &low, 0x07E0, true);
        store.apply(block_on(sync.fetch_initial(&mut online))).unwrap();
        let before = store.snapshot().clone();

        let mut offline = FixedChannel::new("0°", "0°", 0, false);
        prop_assert!(store.apply(block_on(sync.fetch_initial(&mut offline))).is_err());
        prop_assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn successful_syncs_overwrite_every_field(
        first in (temp(), temp(), any::<u16>()),
        second in (temp(), temp(), any::<u16>()),
    ) {
        let mut sync = WeatherSync::new(PeerSelection::LastEnumerated);
        let mut store = WeatherStore::new();

        for (high, low, color) in [&first, &second] {
            let mut channel = FixedChannel::new(high, low, *color, true);
            store.apply(block_on(sync.fetch_initial(&mut channel))).unwrap();
        }

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.high_temp.as_str(), second.0.as_str());
        prop_assert_eq!(snapshot.low_temp.as_str(), second.1.as_str());
        prop_assert_eq!(snapshot.icon.as_ref().unwrap().pixel(0, 0), Some(second.2));
    }
}
