//! Request/response data-layer access over the bridge

use defmt::*;
use embassy_time::{with_timeout, Duration};

use sunshine_core::traits::{CompanionChannel, ItemResult};
use sunshine_protocol::{
    AssemblyError, Asset, AssetAssembler, CompanionMessage, ItemUri, PeerList, WatchMessage,
};

use crate::channels::{OUTBOX, RESPONSES};

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No matching response within the request timeout
    Timeout,
    /// Response of the wrong kind for the request
    UnexpectedResponse,
    /// Asset chunks could not be reassembled
    Assembly(AssemblyError),
}

impl From<AssemblyError> for LinkError {
    fn from(err: AssemblyError) -> Self {
        LinkError::Assembly(err)
    }
}

/// Data-layer client talking to the bridge
pub struct BridgeLink {
    seq: u8,
    timeout: Duration,
}

impl BridgeLink {
    /// Create a link waiting `timeout_ms` for each response
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            seq: 0,
            timeout: Duration::from_millis(timeout_ms as u64),
        }
    }

    fn next_seq(&mut self) -> u8 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    /// Send a request and wait for the response carrying `seq`
    ///
    /// Responses with another sequence number are left over from timed-out
    /// requests and are dropped.
    async fn request(&mut self, seq: u8, msg: WatchMessage) -> Result<CompanionMessage, LinkError> {
        OUTBOX.send(msg).await;
        with_timeout(self.timeout, async {
            loop {
                let response = RESPONSES.receive().await;
                if response.answers(seq) {
                    return response;
                }
                debug!("Dropping stale response {:?}", response.seq());
            }
        })
        .await
        .map_err(|_| LinkError::Timeout)
    }
}

impl CompanionChannel for BridgeLink {
    type Error = LinkError;

    async fn connected_peers(&mut self) -> Result<PeerList, LinkError> {
        let seq = self.next_seq();
        match self.request(seq, WatchMessage::GetPeers { seq }).await? {
            CompanionMessage::Peers { peers, .. } => Ok(peers),
            _ => Err(LinkError::UnexpectedResponse),
        }
    }

    async fn get_data_item(&mut self, uri: &ItemUri) -> Result<ItemResult, LinkError> {
        let seq = self.next_seq();
        let msg = WatchMessage::GetItem {
            seq,
            uri: uri.clone(),
        };
        match self.request(seq, msg).await? {
            CompanionMessage::Item { status, item, .. } => Ok(ItemResult { status, item }),
            _ => Err(LinkError::UnexpectedResponse),
        }
    }

    async fn read_asset(&mut self, asset: &Asset, buf: &mut [u8]) -> Result<usize, LinkError> {
        let mut assembler = AssetAssembler::new(buf);
        loop {
            let seq = self.next_seq();
            let msg = WatchMessage::GetAsset {
                seq,
                asset: asset.clone(),
                offset: assembler.next_offset(),
            };
            match self.request(seq, msg).await? {
                CompanionMessage::AssetChunk {
                    total_len,
                    offset,
                    data,
                    ..
                } => {
                    if let Some(len) = assembler.accept(total_len, offset, &data)? {
                        trace!("Asset read: {} bytes", len);
                        return Ok(len);
                    }
                }
                _ => return Err(LinkError::UnexpectedResponse),
            }
        }
    }

    async fn add_listener(&mut self) -> Result<(), LinkError> {
        OUTBOX.send(WatchMessage::AddListener).await;
        Ok(())
    }
}
