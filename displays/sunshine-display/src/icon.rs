//! Scaled weather icon
//!
//! The icon is scaled uniformly by `size / width` with nearest-neighbour
//! sampling; its height follows the source aspect ratio.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use sunshine_core::weather::IconImage;

/// Icon drawn at `origin`, `size` pixels wide
#[derive(Debug, Clone, Copy)]
pub struct ScaledIcon<'a> {
    icon: &'a IconImage,
    origin: Point,
    size: u16,
}

impl<'a> ScaledIcon<'a> {
    pub fn new(icon: &'a IconImage, origin: Point, size: u16) -> Self {
        Self { icon, origin, size }
    }

    /// Output size after scaling
    pub fn scaled_size(&self) -> Size {
        let width = self.icon.width() as u32;
        let height = (self.icon.height() as u32 * self.size as u32 / width).max(1);
        Size::new(self.size as u32, height)
    }

    fn pixels(&self) -> impl Iterator<Item = Pixel<Rgb565>> + '_ {
        let out = self.scaled_size();
        let width = self.icon.width() as u32;
        let size = self.size as u32;
        (0..out.height).flat_map(move |dy| {
            (0..out.width).filter_map(move |dx| {
                let sx = (dx * width / size) as u16;
                let sy = (dy * width / size) as u16;
                let raw = self.icon.pixel(sx, sy)?;
                let at = self.origin + Point::new(dx as i32, dy as i32);
                Some(Pixel(at, Rgb565::from(RawU16::new(raw))))
            })
        })
    }
}

impl Dimensions for ScaledIcon<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.origin, self.scaled_size())
    }
}

impl Drawable for ScaledIcon<'_> {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.size == 0 {
            return Ok(());
        }
        target.draw_iter(self.pixels())
    }
}
