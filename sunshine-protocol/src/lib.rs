//! Sunshine Companion Link Protocol
//!
//! This crate defines the UART protocol between the watch and the companion
//! bridge (a BLE-UART module relaying the phone's wearable data layer). It
//! mirrors the data-layer model the phone app publishes to: connected peers,
//! data items addressed by a peer-scoped URI, opaque assets, and change
//! events.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬───────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CRC-8 │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B    │
//! └───────┴────────┴──────┴─────────────┴───────┘
//! ```
//!
//! Structured payloads (peer lists, data items, change events) are postcard
//! encoded. Requests carry a sequence byte that the bridge echoes back.

#![no_std]
#![deny(unsafe_code)]

pub mod asset;
pub mod data;
pub mod frame;
pub mod messages;

pub use asset::{AssemblyError, AssetAssembler};
pub use data::{
    Asset, DataError, DataEvent, DataEventKind, DataItem, DataMap, DataValue, ItemUri, Peer,
    PeerId, PeerList,
};
pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{CompanionMessage, ItemStatus, WatchMessage, ASSET_CHUNK_SIZE};
