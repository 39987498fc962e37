//! Weather snapshot and its single-writer store

use heapless::String;
use sunshine_protocol::data::MAX_TEXT_LEN;

use super::icon::IconImage;

/// Temperature text as sent by the phone (e.g. "24°")
pub type TempText = String<MAX_TEXT_LEN>;

/// Weather summary received from the companion
///
/// Fields are only ever replaced together, so a snapshot is either the
/// empty default or the full result of one successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub high_temp: TempText,
    pub low_temp: TempText,
    pub icon: Option<IconImage>,
}

impl WeatherSnapshot {
    /// Snapshot before the first sync
    pub const fn empty() -> Self {
        Self {
            high_temp: String::new(),
            low_temp: String::new(),
            icon: None,
        }
    }

    /// Check if nothing has been synced yet
    pub fn is_empty(&self) -> bool {
        self.high_temp.is_empty() && self.low_temp.is_empty() && self.icon.is_none()
    }
}

/// Holds the latest snapshot and counts successful commits
#[derive(Debug, Clone)]
pub struct WeatherStore {
    snapshot: WeatherSnapshot,
    revision: u32,
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore {
    /// Create a store holding the empty snapshot
    pub const fn new() -> Self {
        Self {
            snapshot: WeatherSnapshot::empty(),
            revision: 0,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    /// Number of snapshots committed so far
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Replace the snapshot wholesale
    pub fn commit(&mut self, snapshot: WeatherSnapshot) {
        self.snapshot = snapshot;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Commit a sync result
    ///
    /// On error the previous snapshot is kept and the error is handed back
    /// for logging.
    pub fn apply<E>(&mut self, result: Result<WeatherSnapshot, E>) -> Result<(), E> {
        self.commit(result?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::icon::tests::solid_asset;

    fn snapshot(high: &str, low: &str, color: u16) -> WeatherSnapshot {
        WeatherSnapshot {
            high_temp: TempText::try_from(high).unwrap(),
            low_temp: TempText::try_from(low).unwrap(),
            icon: Some(IconImage::decode(&solid_asset(2, 2, color)).unwrap()),
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = WeatherStore::new();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_commit_overwrites_all_fields() {
        let mut store = WeatherStore::new();
        store.commit(snapshot("25°", "16°", 0xFFE0));
        store.commit(snapshot("12°", "3°", 0x001F));

        let current = store.snapshot();
        assert_eq!(current.high_temp.as_str(), "12°");
        assert_eq!(current.low_temp.as_str(), "3°");
        assert_eq!(current.icon.as_ref().unwrap().pixel(0, 0), Some(0x001F));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_failed_result_keeps_previous() {
        let mut store = WeatherStore::new();
        store.commit(snapshot("25°", "16°", 0xFFE0));

        let result: Result<WeatherSnapshot, ()> = Err(());
        assert_eq!(store.apply(result), Err(()));
        assert_eq!(store.snapshot().high_temp.as_str(), "25°");
        assert_eq!(store.revision(), 1);
    }
}
