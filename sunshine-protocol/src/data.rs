//! Data-layer types relayed by the companion bridge
//!
//! The phone app publishes a data item at a well-known path on its own
//! peer. The watch addresses that item with a peer-scoped URI of the form
//! `wear://<peer-id>/<path>`. Large binary values (the weather icon) travel
//! as assets: the item only holds a digest, and the bytes are fetched
//! separately in chunks.

use core::fmt;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// URI scheme used for data-layer item URIs
pub const WEAR_URI_SCHEME: &str = "wear";

/// Maximum length of a peer (node) identifier
pub const MAX_PEER_ID_LEN: usize = 24;

/// Maximum length of a human-readable peer name
pub const MAX_PEER_NAME_LEN: usize = 16;

/// Maximum length of a data item path
pub const MAX_PATH_LEN: usize = 16;

/// Maximum length of a data map key
pub const MAX_KEY_LEN: usize = 12;

/// Maximum length of a data map text value
pub const MAX_TEXT_LEN: usize = 12;

/// Maximum length of an asset digest
pub const MAX_DIGEST_LEN: usize = 32;

/// Maximum entries in a data map
pub const MAX_ENTRIES: usize = 4;

/// Maximum peers reported by the bridge
pub const MAX_PEERS: usize = 3;

/// Peer (node) identifier
pub type PeerId = String<MAX_PEER_ID_LEN>;

/// Connected peers, in the order the bridge enumerated them
pub type PeerList = Vec<Peer, MAX_PEERS>;

/// Errors building data-layer values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataError {
    /// A string or collection exceeded its fixed capacity
    CapacityExceeded,
}

fn bounded<const N: usize>(s: &str) -> Result<String<N>, DataError> {
    let mut out = String::new();
    out.push_str(s).map_err(|_| DataError::CapacityExceeded)?;
    Ok(out)
}

/// A device connected to the data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Peer {
    /// Node identifier, used as the URI authority
    pub id: PeerId,
    /// Display name
    pub name: String<MAX_PEER_NAME_LEN>,
    /// Whether the peer is directly connected rather than relayed
    pub nearby: bool,
}

impl Peer {
    /// Create a peer description
    pub fn new(id: &str, name: &str, nearby: bool) -> Result<Self, DataError> {
        Ok(Self {
            id: bounded(id)?,
            name: bounded(name)?,
            nearby,
        })
    }
}

/// Peer-scoped address of a data item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemUri {
    /// Authority: the peer that owns the item
    pub peer: PeerId,
    /// Item path, starting with '/'
    pub path: String<MAX_PATH_LEN>,
}

impl ItemUri {
    /// Build the URI of `path` on `peer`
    pub fn new(peer: &str, path: &str) -> Result<Self, DataError> {
        Ok(Self {
            peer: bounded(peer)?,
            path: bounded(path)?,
        })
    }

    /// Check whether this URI addresses `path`, regardless of peer
    pub fn has_path(&self, path: &str) -> bool {
        self.path.as_str() == path
    }
}

impl fmt::Display for ItemUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", WEAR_URI_SCHEME, self.peer, self.path)
    }
}

/// Reference to an opaque binary asset held by the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Asset {
    /// Content digest identifying the asset
    pub digest: String<MAX_DIGEST_LEN>,
}

impl Asset {
    /// Create an asset reference from its digest
    pub fn from_digest(digest: &str) -> Result<Self, DataError> {
        Ok(Self {
            digest: bounded(digest)?,
        })
    }
}

/// A value stored in a data map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataValue {
    Text(String<MAX_TEXT_LEN>),
    Asset(Asset),
}

/// Key/value entry in a data map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataEntry {
    pub key: String<MAX_KEY_LEN>,
    pub value: DataValue,
}

/// Small string-keyed map carried by a data item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataMap {
    entries: Vec<DataEntry, MAX_ENTRIES>,
}

impl DataMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn put(&mut self, key: &str, value: DataValue) -> Result<(), DataError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key.as_str() == key) {
            entry.value = value;
            return Ok(());
        }
        let entry = DataEntry {
            key: bounded(key)?,
            value,
        };
        self.entries
            .push(entry)
            .map_err(|_| DataError::CapacityExceeded)
    }

    /// Insert or replace a text value
    pub fn put_string(&mut self, key: &str, value: &str) -> Result<(), DataError> {
        self.put(key, DataValue::Text(bounded(value)?))
    }

    /// Insert or replace an asset reference
    pub fn put_asset(&mut self, key: &str, asset: Asset) -> Result<(), DataError> {
        self.put(key, DataValue::Asset(asset))
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries
            .iter()
            .find(|e| e.key.as_str() == key)
            .map(|e| &e.value)
    }

    /// Look up a text value. Returns None if absent or not text.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(DataValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Look up an asset reference. Returns None if absent or not an asset.
    pub fn get_asset(&self, key: &str) -> Option<&Asset> {
        match self.get(key) {
            Some(DataValue::Asset(a)) => Some(a),
            _ => None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A data item: a URI plus its map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataItem {
    pub uri: ItemUri,
    pub data: DataMap,
}

/// Kind of data-layer change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataEventKind {
    /// Item created or updated
    Changed,
    /// Item removed
    Deleted,
}

/// Change notification pushed by the bridge while a listener is registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_uri_display() {
        let uri = ItemUri::new("a1b2c3", "/sunshine").unwrap();
        let mut out: String<48> = String::new();
        write!(out, "{}", uri).unwrap();
        assert_eq!(out.as_str(), "wear://a1b2c3/sunshine");
    }

    #[test]
    fn test_uri_path_match() {
        let uri = ItemUri::new("node", "/sunshine").unwrap();
        assert!(uri.has_path("/sunshine"));
        assert!(!uri.has_path("/sunshine/extra"));
    }

    #[test]
    fn test_peer_id_too_long() {
        let long = "0123456789012345678901234";
        assert_eq!(Peer::new(long, "x", true), Err(DataError::CapacityExceeded));
    }

    #[test]
    fn test_map_put_replaces_existing_key() {
        let mut map = DataMap::new();
        map.put_string("HIGH_TEMP", "21°").unwrap();
        map.put_string("HIGH_TEMP", "24°").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_string("HIGH_TEMP"), Some("24°"));
    }

    #[test]
    fn test_map_typed_lookup() {
        let mut map = DataMap::new();
        map.put_string("LOW_TEMP", "9°").unwrap();
        map.put_asset("WEATHER_IMG", Asset::from_digest("abcd").unwrap())
            .unwrap();

        assert_eq!(map.get_string("LOW_TEMP"), Some("9°"));
        assert!(map.get_asset("LOW_TEMP").is_none());
        assert_eq!(map.get_asset("WEATHER_IMG").unwrap().digest.as_str(), "abcd");
        assert!(map.get_string("WEATHER_IMG").is_none());
        assert!(map.get("MISSING").is_none());
    }

    #[test]
    fn test_map_capacity() {
        let mut map = DataMap::new();
        for key in ["A", "B", "C", "D"] {
            map.put_string(key, "1").unwrap();
        }
        assert_eq!(map.put_string("E", "1"), Err(DataError::CapacityExceeded));
        // Replacing an existing key still works when full
        assert!(map.put_string("A", "2").is_ok());
    }
}
