//! Message types for the companion link
//!
//! Message types are divided into two categories:
//! - Watch → Companion: connection control, data-layer queries, heartbeat
//! - Companion → Watch: query responses, change events, clock updates
//!
//! Queries (`GetPeers`, `GetItem`, `GetAsset`) start with a sequence byte
//! that the bridge copies into the matching response so stale responses can
//! be discarded.

use heapless::Vec;
use serde::{de::DeserializeOwned, Serialize};

use crate::data::{Asset, DataEvent, DataItem, ItemUri, PeerList};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Watch → Companion
pub const MSG_CONNECT: u8 = 0x01;
pub const MSG_DISCONNECT: u8 = 0x02;
pub const MSG_GET_PEERS: u8 = 0x03;
pub const MSG_GET_ITEM: u8 = 0x04;
pub const MSG_GET_ASSET: u8 = 0x05;
pub const MSG_ADD_LISTENER: u8 = 0x06;
pub const MSG_REMOVE_LISTENER: u8 = 0x07;
pub const MSG_PING: u8 = 0x08;

// Message type IDs: Companion → Watch
pub const MSG_CONNECTED: u8 = 0x20;
pub const MSG_CONNECTION_SUSPENDED: u8 = 0x21;
pub const MSG_CONNECTION_FAILED: u8 = 0x22;
pub const MSG_PEERS: u8 = 0x23;
pub const MSG_ITEM: u8 = 0x24;
pub const MSG_ASSET_CHUNK: u8 = 0x25;
pub const MSG_DATA_CHANGED: u8 = 0x26;
pub const MSG_TIME_SYNC: u8 = 0x27;
pub const MSG_TIME_ZONE: u8 = 0x28;
pub const MSG_PONG: u8 = 0x29;

/// Maximum asset bytes carried by one chunk
pub const ASSET_CHUNK_SIZE: usize = 240;

/// Asset chunk header: seq, total length, offset
const ASSET_CHUNK_HEADER: usize = 5;

/// Status of a `GetItem` lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemStatus {
    /// Lookup succeeded (the item may still be absent)
    Success,
    /// Peer unreachable or lookup failed on the bridge
    Failed,
}

impl ItemStatus {
    fn to_byte(self) -> u8 {
        match self {
            ItemStatus::Success => 0,
            ItemStatus::Failed => 1,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ItemStatus::Success),
            1 => Some(ItemStatus::Failed),
            _ => None,
        }
    }

    /// Check if the lookup succeeded
    pub fn is_success(self) -> bool {
        self == ItemStatus::Success
    }
}

fn encode_body<T: Serialize>(
    msg_type: u8,
    header: &[u8],
    value: &T,
) -> Result<Frame, FrameError> {
    let mut body = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(value, &mut body).map_err(|_| FrameError::PayloadTooLarge)?;
    Frame::with_header(msg_type, header, used)
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, FrameError> {
    postcard::from_bytes(body).map_err(|_| FrameError::InvalidFrame)
}

fn seq_of(frame: &Frame) -> Result<u8, FrameError> {
    frame.payload.first().copied().ok_or(FrameError::InvalidFrame)
}

/// Messages from the watch to the companion bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Open the data-layer connection
    Connect,
    /// Close the data-layer connection
    Disconnect,
    /// Enumerate connected peers
    GetPeers { seq: u8 },
    /// Fetch the data item at a peer-scoped URI
    GetItem { seq: u8, uri: ItemUri },
    /// Fetch asset bytes starting at `offset`
    GetAsset { seq: u8, asset: Asset, offset: u16 },
    /// Start forwarding change events
    AddListener,
    /// Stop forwarding change events
    RemoveListener,
    /// Heartbeat request
    Ping,
}

impl WatchMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            WatchMessage::Connect => Ok(Frame::empty(MSG_CONNECT)),
            WatchMessage::Disconnect => Ok(Frame::empty(MSG_DISCONNECT)),
            WatchMessage::GetPeers { seq } => Frame::new(MSG_GET_PEERS, &[*seq]),
            WatchMessage::GetItem { seq, uri } => encode_body(MSG_GET_ITEM, &[*seq], uri),
            WatchMessage::GetAsset { seq, asset, offset } => {
                // Payload: [seq][offset LE][digest...]
                let o = offset.to_le_bytes();
                Frame::with_header(MSG_GET_ASSET, &[*seq, o[0], o[1]], asset.digest.as_bytes())
            }
            WatchMessage::AddListener => Ok(Frame::empty(MSG_ADD_LISTENER)),
            WatchMessage::RemoveListener => Ok(Frame::empty(MSG_REMOVE_LISTENER)),
            WatchMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }

    /// Parse a message from a frame (bridge side, or for testing)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_CONNECT => Ok(WatchMessage::Connect),
            MSG_DISCONNECT => Ok(WatchMessage::Disconnect),
            MSG_GET_PEERS => Ok(WatchMessage::GetPeers {
                seq: seq_of(frame)?,
            }),
            MSG_GET_ITEM => {
                let (header, body) = frame.split_header(1)?;
                Ok(WatchMessage::GetItem {
                    seq: header[0],
                    uri: decode_body(body)?,
                })
            }
            MSG_GET_ASSET => {
                let (header, digest) = frame.split_header(3)?;
                let digest = core::str::from_utf8(digest).map_err(|_| FrameError::InvalidFrame)?;
                Ok(WatchMessage::GetAsset {
                    seq: header[0],
                    offset: u16::from_le_bytes([header[1], header[2]]),
                    asset: Asset::from_digest(digest).map_err(|_| FrameError::InvalidFrame)?,
                })
            }
            MSG_ADD_LISTENER => Ok(WatchMessage::AddListener),
            MSG_REMOVE_LISTENER => Ok(WatchMessage::RemoveListener),
            MSG_PING => Ok(WatchMessage::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Messages from the companion bridge to the watch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompanionMessage {
    /// Data-layer connection established
    Connected,
    /// Connection temporarily suspended by the phone
    ConnectionSuspended,
    /// Connection attempt failed
    ConnectionFailed,
    /// Response to `GetPeers`
    Peers { seq: u8, peers: PeerList },
    /// Response to `GetItem`
    Item {
        seq: u8,
        status: ItemStatus,
        item: Option<DataItem>,
    },
    /// Response to `GetAsset`
    AssetChunk {
        seq: u8,
        /// Total asset size in bytes
        total_len: u16,
        /// Offset of `data` within the asset
        offset: u16,
        data: Vec<u8, ASSET_CHUNK_SIZE>,
    },
    /// Change notification (only sent while a listener is registered)
    DataChanged(DataEvent),
    /// Wall-clock time from the phone, in milliseconds since the UNIX epoch
    TimeSync { epoch_ms: i64 },
    /// Phone time zone changed; offset from UTC in seconds
    TimeZone { offset_s: i32 },
    /// Heartbeat response
    Pong,
}

impl CompanionMessage {
    /// Sequence byte for query responses
    pub fn seq(&self) -> Option<u8> {
        match self {
            CompanionMessage::Peers { seq, .. }
            | CompanionMessage::Item { seq, .. }
            | CompanionMessage::AssetChunk { seq, .. } => Some(*seq),
            _ => None,
        }
    }

    /// Check if this is the response to the query sent with `seq`
    ///
    /// Notifications never answer a query, and a response carrying another
    /// sequence number is left over from a query that already timed out.
    pub fn answers(&self, seq: u8) -> bool {
        self.seq() == Some(seq)
    }

    /// Encode this message into a frame (bridge side, or for testing)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            CompanionMessage::Connected => Ok(Frame::empty(MSG_CONNECTED)),
            CompanionMessage::ConnectionSuspended => Ok(Frame::empty(MSG_CONNECTION_SUSPENDED)),
            CompanionMessage::ConnectionFailed => Ok(Frame::empty(MSG_CONNECTION_FAILED)),
            CompanionMessage::Peers { seq, peers } => encode_body(MSG_PEERS, &[*seq], peers),
            CompanionMessage::Item { seq, status, item } => {
                encode_body(MSG_ITEM, &[*seq, status.to_byte()], item)
            }
            CompanionMessage::AssetChunk {
                seq,
                total_len,
                offset,
                data,
            } => {
                let t = total_len.to_le_bytes();
                let o = offset.to_le_bytes();
                Frame::with_header(MSG_ASSET_CHUNK, &[*seq, t[0], t[1], o[0], o[1]], data)
            }
            CompanionMessage::DataChanged(event) => encode_body(MSG_DATA_CHANGED, &[], event),
            CompanionMessage::TimeSync { epoch_ms } => {
                Frame::new(MSG_TIME_SYNC, &epoch_ms.to_le_bytes())
            }
            CompanionMessage::TimeZone { offset_s } => {
                Frame::new(MSG_TIME_ZONE, &offset_s.to_le_bytes())
            }
            CompanionMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_CONNECTED => Ok(CompanionMessage::Connected),
            MSG_CONNECTION_SUSPENDED => Ok(CompanionMessage::ConnectionSuspended),
            MSG_CONNECTION_FAILED => Ok(CompanionMessage::ConnectionFailed),
            MSG_PEERS => {
                let (header, body) = frame.split_header(1)?;
                Ok(CompanionMessage::Peers {
                    seq: header[0],
                    peers: decode_body(body)?,
                })
            }
            MSG_ITEM => {
                let (header, body) = frame.split_header(2)?;
                Ok(CompanionMessage::Item {
                    seq: header[0],
                    status: ItemStatus::from_byte(header[1]).ok_or(FrameError::InvalidFrame)?,
                    item: decode_body(body)?,
                })
            }
            MSG_ASSET_CHUNK => {
                let (header, body) = frame.split_header(ASSET_CHUNK_HEADER)?;
                let mut data = Vec::new();
                data.extend_from_slice(body)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(CompanionMessage::AssetChunk {
                    seq: header[0],
                    total_len: u16::from_le_bytes([header[1], header[2]]),
                    offset: u16::from_le_bytes([header[3], header[4]]),
                    data,
                })
            }
            MSG_DATA_CHANGED => Ok(CompanionMessage::DataChanged(decode_body(&frame.payload)?)),
            MSG_TIME_SYNC => {
                let bytes: [u8; 8] = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::InvalidFrame)?;
                Ok(CompanionMessage::TimeSync {
                    epoch_ms: i64::from_le_bytes(bytes),
                })
            }
            MSG_TIME_ZONE => {
                let bytes: [u8; 4] = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::InvalidFrame)?;
                Ok(CompanionMessage::TimeZone {
                    offset_s: i32::from_le_bytes(bytes),
                })
            }
            MSG_PONG => Ok(CompanionMessage::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataEventKind, DataMap, Peer};
    use crate::frame::FrameParser;

    fn weather_item() -> DataItem {
        let mut data = DataMap::new();
        data.put_string("HIGH_TEMP", "-12°").unwrap();
        data.put_string("LOW_TEMP", "-20°").unwrap();
        data.put_asset(
            "WEATHER_IMG",
            Asset::from_digest("0123456789abcdef0123456789abcdef").unwrap(),
        )
        .unwrap();
        DataItem {
            uri: ItemUri::new("phone-7c1e0d2a9b44f1e3", "/sunshine").unwrap(),
            data,
        }
    }

    #[test]
    fn test_connect_is_empty() {
        let frame = WatchMessage::Connect.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_CONNECT);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_get_asset_layout() {
        let msg = WatchMessage::GetAsset {
            seq: 9,
            asset: Asset::from_digest("ff00").unwrap(),
            offset: 480,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_GET_ASSET);
        assert_eq!(frame.payload[0], 9);
        assert_eq!(u16::from_le_bytes([frame.payload[1], frame.payload[2]]), 480);
        assert_eq!(&frame.payload[3..], b"ff00");
        assert_eq!(WatchMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_get_item_through_parser() {
        let msg = WatchMessage::GetItem {
            seq: 3,
            uri: ItemUri::new("node-1", "/sunshine").unwrap(),
        };
        let bytes = msg.to_frame().unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&bytes).unwrap().unwrap();
        assert_eq!(WatchMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_full_weather_item_fits_one_frame() {
        let msg = CompanionMessage::Item {
            seq: 1,
            status: ItemStatus::Success,
            item: Some(weather_item()),
        };
        let frame = msg.to_frame().unwrap();
        assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);
        assert_eq!(CompanionMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_failed_item_without_body() {
        let msg = CompanionMessage::Item {
            seq: 4,
            status: ItemStatus::Failed,
            item: None,
        };
        let frame = msg.to_frame().unwrap();
        let parsed = CompanionMessage::from_frame(&frame).unwrap();
        match parsed {
            CompanionMessage::Item { seq, status, item } => {
                assert_eq!(seq, 4);
                assert!(!status.is_success());
                assert!(item.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_peers_preserve_order() {
        let mut peers = PeerList::new();
        peers.push(Peer::new("relay", "Cloud", false).unwrap()).unwrap();
        peers.push(Peer::new("phone", "Pixel", true).unwrap()).unwrap();

        let frame = CompanionMessage::Peers { seq: 2, peers }.to_frame().unwrap();
        match CompanionMessage::from_frame(&frame).unwrap() {
            CompanionMessage::Peers { seq, peers } => {
                assert_eq!(seq, 2);
                assert_eq!(peers[0].id.as_str(), "relay");
                assert_eq!(peers[1].id.as_str(), "phone");
                assert!(peers[1].nearby);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_data_changed_event() {
        let msg = CompanionMessage::DataChanged(DataEvent {
            kind: DataEventKind::Changed,
            item: weather_item(),
        });
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_DATA_CHANGED);
        assert_eq!(CompanionMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_asset_chunk_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0xAB; 16]).unwrap();
        let msg = CompanionMessage::AssetChunk {
            seq: 7,
            total_len: 1032,
            offset: 240,
            data,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload.len(), ASSET_CHUNK_HEADER + 16);
        assert_eq!(msg.seq(), Some(7));
        assert_eq!(CompanionMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_time_messages() {
        let sync = CompanionMessage::TimeSync {
            epoch_ms: 1_792_224_000_123,
        };
        let frame = sync.to_frame().unwrap();
        assert_eq!(frame.payload.len(), 8);
        assert_eq!(CompanionMessage::from_frame(&frame).unwrap(), sync);

        let zone = CompanionMessage::TimeZone { offset_s: -18_000 };
        let frame = zone.to_frame().unwrap();
        assert_eq!(CompanionMessage::from_frame(&frame).unwrap(), zone);
    }

    #[test]
    fn test_truncated_time_sync_rejected() {
        let frame = Frame::new(MSG_TIME_SYNC, &[1, 2, 3]).unwrap();
        assert_eq!(
            CompanionMessage::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let frame = Frame::empty(0x7F);
        assert!(CompanionMessage::from_frame(&frame).is_err());
        assert!(WatchMessage::from_frame(&frame).is_err());
    }

    #[test]
    fn test_notifications_have_no_seq() {
        assert_eq!(CompanionMessage::Connected.seq(), None);
        assert_eq!(CompanionMessage::TimeZone { offset_s: 0 }.seq(), None);
    }

    #[test]
    fn test_stale_response_does_not_answer() {
        let response = CompanionMessage::Peers {
            seq: 7,
            peers: PeerList::new(),
        };
        assert!(response.answers(7));
        // Left over from a timed-out query
        assert!(!response.answers(8));
        assert!(!CompanionMessage::Connected.answers(0));
        assert!(!CompanionMessage::TimeSync { epoch_ms: 0 }.answers(7));
    }
}
