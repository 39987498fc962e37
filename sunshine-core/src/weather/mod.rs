//! Cached weather summary

pub mod icon;
pub mod snapshot;

pub use icon::{IconError, IconImage, ICON_HEADER_LEN, ICON_MAGIC, MAX_ASSET_BYTES, MAX_ICON_DIM};
pub use snapshot::{TempText, WeatherSnapshot, WeatherStore};
