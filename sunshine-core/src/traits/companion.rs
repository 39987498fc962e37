//! Companion channel trait

use core::fmt::Debug;
use core::future::Future;

use sunshine_protocol::{Asset, DataItem, ItemStatus, ItemUri, PeerList};

/// Result of a data item lookup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemResult {
    /// Whether the lookup itself succeeded
    pub status: ItemStatus,
    /// The item, if one exists at the URI
    pub item: Option<DataItem>,
}

/// Request/response access to the phone's data layer
///
/// Implementations own connection management; each call is a single
/// request that either completes or fails with a transport error.
pub trait CompanionChannel {
    /// Transport error type
    type Error: Debug;

    /// List peers currently reachable, in enumeration order
    fn connected_peers(&mut self) -> impl Future<Output = Result<PeerList, Self::Error>>;

    /// Fetch the data item at `uri`
    fn get_data_item(
        &mut self,
        uri: &ItemUri,
    ) -> impl Future<Output = Result<ItemResult, Self::Error>>;

    /// Read the full contents of `asset` into `buf`
    ///
    /// Returns the number of bytes written. Assets larger than `buf`
    /// are an error.
    fn read_asset(
        &mut self,
        asset: &Asset,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<usize, Self::Error>>;

    /// Start receiving change notifications
    fn add_listener(&mut self) -> impl Future<Output = Result<(), Self::Error>>;
}
