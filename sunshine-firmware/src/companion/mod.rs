//! Companion bridge link
//!
//! The bridge relays the phone's data layer over UART. Requests are queued
//! on the outbox for the TX task; responses arrive on the response channel
//! from the RX task.

pub mod link;

pub use link::{BridgeLink, LinkError};
