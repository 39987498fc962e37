//! Configuration loading
//!
//! `watchface.toml` is validated by the build script and embedded as
//! postcard binary, so loading never parses TOML on the device.

use defmt::*;

use sunshine_core::config::FaceConfig;

/// Face configuration serialized at build time
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/face_config.bin"));

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Deserialization failed
    Deserialize,
    /// Values failed validation
    Invalid(sunshine_core::config::ConfigError),
}

/// Decode a serialized face configuration
pub fn decode(bytes: &[u8]) -> Result<FaceConfig, LoadError> {
    let config: FaceConfig = postcard::from_bytes(bytes).map_err(|_| LoadError::Deserialize)?;
    config.validate().map_err(LoadError::Invalid)?;
    Ok(config)
}

/// Load the embedded configuration, falling back to defaults
pub fn load() -> FaceConfig {
    match decode(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded face configuration");
            config
        }
        Err(e) => {
            // Only possible if the build script and firmware disagree on the format
            error!("Failed to load embedded config: {:?}", e);
            error!("Using default face configuration");
            FaceConfig::default()
        }
    }
}
