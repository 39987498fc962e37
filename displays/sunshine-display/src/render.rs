//! Scene renderer

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use profont::{PROFONT_10_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};
use sunshine_core::config::FontSize;

use crate::icon::ScaledIcon;
use crate::scene::{DrawOp, Scene};

/// Font used for a configured text size
pub fn font_for(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &PROFONT_10_POINT,
        FontSize::Medium => &PROFONT_14_POINT,
        FontSize::Large => &PROFONT_18_POINT,
        FontSize::Huge => &PROFONT_24_POINT,
    }
}

/// Draw every operation of `scene`, in order
pub fn render<D>(target: &mut D, scene: &Scene<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for op in scene.ops() {
        match *op {
            DrawOp::Fill(color) => target.clear(color)?,
            DrawOp::Text {
                text,
                at,
                size,
                color,
            } => {
                let style = MonoTextStyle::new(font_for(size), color);
                Text::new(text, at, style).draw(target)?;
            }
            DrawOp::Line { from, length, color } => {
                let to = from + Point::new(length as i32, 0);
                Line::new(from, to)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            }
            DrawOp::Icon { icon, at, size } => {
                ScaledIcon::new(icon, at, size).draw(target)?;
            }
        }
    }
    Ok(())
}
