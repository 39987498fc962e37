//! Weather icon raster
//!
//! Asset layout:
//! - MAGIC (4 bytes): "R565"
//! - WIDTH (u16 LE)
//! - HEIGHT (u16 LE)
//! - PIXELS: WIDTH * HEIGHT big-endian RGB565 values, row-major

use heapless::Vec;

/// Asset magic bytes
pub const ICON_MAGIC: &[u8; 4] = b"R565";

/// Header length in bytes
pub const ICON_HEADER_LEN: usize = 8;

/// Largest accepted icon edge, in pixels
pub const MAX_ICON_DIM: u16 = 64;

const MAX_PIXELS: usize = MAX_ICON_DIM as usize * MAX_ICON_DIM as usize;

/// Largest asset that can hold a valid icon
pub const MAX_ASSET_BYTES: usize = ICON_HEADER_LEN + MAX_PIXELS * 2;

/// Icon decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IconError {
    /// Missing or wrong magic bytes
    BadMagic,
    /// Zero or oversized dimensions
    BadDimensions,
    /// Pixel data shorter or longer than the header declares
    LengthMismatch,
    /// Asset could not be read from the companion
    Unavailable,
}

/// Decoded RGB565 raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u16,
    height: u16,
    pixels: Vec<u16, MAX_PIXELS>,
}

impl IconImage {
    /// Decode an icon asset
    pub fn decode(bytes: &[u8]) -> Result<Self, IconError> {
        if bytes.len() < ICON_HEADER_LEN || &bytes[..4] != ICON_MAGIC {
            return Err(IconError::BadMagic);
        }
        let width = u16::from_le_bytes([bytes[4], bytes[5]]);
        let height = u16::from_le_bytes([bytes[6], bytes[7]]);
        if width == 0 || height == 0 || width > MAX_ICON_DIM || height > MAX_ICON_DIM {
            return Err(IconError::BadDimensions);
        }

        let data = &bytes[ICON_HEADER_LEN..];
        if data.len() != width as usize * height as usize * 2 {
            return Err(IconError::LengthMismatch);
        }

        let mut pixels = Vec::new();
        for px in data.chunks_exact(2) {
            // Bounded by the dimension check above
            let _ = pixels.push(u16::from_be_bytes([px[0], px[1]]));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw RGB565 value at (x, y), or None outside the raster
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IconImage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "IconImage({}x{})", self.width, self.height)
    }
}
