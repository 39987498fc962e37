//! Test helpers: an in-memory panel and snapshot builders

extern crate std;

use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use sunshine_core::weather::{IconImage, TempText, WeatherSnapshot, ICON_MAGIC};

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 240;

/// 240x240 RGB565 framebuffer, initially black
pub struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: std::vec![Rgb565::BLACK; (WIDTH * HEIGHT) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb565 {
        self.pixels[(y * WIDTH + x) as usize]
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Count pixels of `color` inside a rectangle
    pub fn count_in(&self, x: u32, y: u32, w: u32, h: u32, color: Rgb565) -> usize {
        let mut n = 0;
        for py in y..(y + h).min(HEIGHT) {
            for px in x..(x + w).min(WIDTH) {
                if self.pixel(px, py) == color {
                    n += 1;
                }
            }
        }
        n
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        for Pixel(at, color) in pixels {
            if at.x >= 0 && at.y >= 0 && (at.x as u32) < WIDTH && (at.y as u32) < HEIGHT {
                self.pixels[(at.y as u32 * WIDTH + at.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}

/// Icon from raw RGB565 values
pub fn icon_from(width: u16, height: u16, pixels: &[u16]) -> IconImage {
    let mut asset = Vec::new();
    asset.extend_from_slice(ICON_MAGIC);
    asset.extend_from_slice(&width.to_le_bytes());
    asset.extend_from_slice(&height.to_le_bytes());
    for p in pixels {
        asset.extend_from_slice(&p.to_be_bytes());
    }
    IconImage::decode(&asset).unwrap()
}

/// Solid-color icon
pub fn icon(width: u16, height: u16, color: u16) -> IconImage {
    let pixels: Vec<u16> = std::vec![color; width as usize * height as usize];
    icon_from(width, height, &pixels)
}

pub fn weather(high: &str, low: &str, icon: Option<IconImage>) -> WeatherSnapshot {
    WeatherSnapshot {
        high_temp: TempText::try_from(high).unwrap(),
        low_temp: TempText::try_from(low).unwrap(),
        icon,
    }
}
