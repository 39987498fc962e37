//! Scene composition
//!
//! Interactive frames show the time, date, temperatures, separator and icon
//! over the configured background. Ambient frames show only the time on
//! black.

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use heapless::Vec;
use sunshine_core::config::{FaceConfig, FontSize, Offset};
use sunshine_core::face::FaceMode;
use sunshine_core::format::{date_text, time_text, DateText, TimeText};
use sunshine_core::weather::{IconImage, WeatherSnapshot};

/// Most operations a scene can hold
pub const MAX_DRAW_OPS: usize = 8;

/// Content of one frame
#[derive(Debug, Clone)]
pub struct FaceView<'a> {
    pub mode: FaceMode,
    pub time: TimeText,
    pub date: DateText,
    pub weather: &'a WeatherSnapshot,
}

impl<'a> FaceView<'a> {
    /// Capture the view at local time `now`
    pub fn at(mode: FaceMode, now: &NaiveDateTime, weather: &'a WeatherSnapshot) -> Self {
        Self {
            mode,
            time: time_text(now.hour(), now.minute()),
            date: date_text(now),
            weather,
        }
    }
}

/// A single drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp<'a> {
    /// Fill the whole target
    Fill(Rgb565),
    /// Text with its baseline starting at `at`
    Text {
        text: &'a str,
        at: Point,
        size: FontSize,
        color: Rgb565,
    },
    /// Horizontal line
    Line {
        from: Point,
        length: u16,
        color: Rgb565,
    },
    /// Icon scaled to `size` pixels wide with its top-left at `at`
    Icon {
        icon: &'a IconImage,
        at: Point,
        size: u16,
    },
}

/// Ordered draw operations for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    ops: Vec<DrawOp<'a>, MAX_DRAW_OPS>,
}

impl<'a> Scene<'a> {
    /// Lay out `view` according to `config`
    pub fn compose(view: &'a FaceView<'a>, config: &FaceConfig) -> Self {
        let mode = view.mode;
        let layout = config.layout.resolve(mode.round);
        let palette = &config.palette;
        let primary = text_color(palette.primary_text, mode.antialias);
        let secondary = text_color(palette.secondary_text, mode.antialias);

        let mut ops = Vec::new();
        let mut push = |op| {
            // Capacity covers the full interactive frame
            let _ = ops.push(op);
        };

        if mode.ambient {
            push(DrawOp::Fill(Rgb565::BLACK));
        } else {
            push(DrawOp::Fill(rgb(palette.background)));
        }

        push(DrawOp::Text {
            text: &view.time,
            at: point(layout.time.offset),
            size: layout.time.size,
            color: primary,
        });

        if !mode.ambient {
            push(DrawOp::Text {
                text: &view.date,
                at: point(layout.date.offset),
                size: layout.date.size,
                color: secondary,
            });

            let weather = view.weather;
            push(DrawOp::Text {
                text: &weather.high_temp,
                at: point(layout.high.offset),
                size: layout.high.size,
                color: primary,
            });
            push(DrawOp::Text {
                text: &weather.low_temp,
                at: point(layout.low.offset),
                size: layout.low.size,
                color: secondary,
            });
            push(DrawOp::Line {
                from: point(layout.separator.offset),
                length: layout.separator.length,
                color: secondary,
            });
            if let Some(icon) = &weather.icon {
                push(DrawOp::Icon {
                    icon,
                    at: point(layout.icon.offset),
                    size: layout.icon.size,
                });
            }
        }

        Self { ops }
    }

    /// Operations in drawing order
    pub fn ops(&self) -> &[DrawOp<'a>] {
        &self.ops
    }
}

fn point(offset: Offset) -> Point {
    Point::new(offset.x as i32, offset.y as i32)
}

/// Convert a 0xRRGGBB color
pub fn rgb(value: u32) -> Rgb565 {
    let [_, r, g, b] = value.to_be_bytes();
    Rgb888::new(r, g, b).into()
}

/// Text color
///
/// Antialias is only off in low-bit ambient, which is always drawn on
/// black, so the text is white there.
fn text_color(value: u32, antialias: bool) -> Rgb565 {
    if antialias {
        rgb(value)
    } else {
        Rgb565::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sunshine_core::weather::TempText;

    use crate::testing::{icon, weather};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap()
    }

    fn mode(ambient: bool) -> FaceMode {
        FaceMode {
            ambient,
            antialias: true,
            round: false,
            utc_offset_s: 0,
        }
    }

    #[test]
    fn test_view_texts() {
        let weather = WeatherSnapshot::default();
        let view = FaceView::at(mode(false), &now(), &weather);
        assert_eq!(view.time.as_str(), "7:05");
        assert_eq!(view.date.as_str(), "Sat, Oct 17 2026");
    }

    #[test]
    fn test_interactive_scene_order() {
        let weather = weather("21°", "12°", Some(icon(2, 2, 0xFFE0)));
        let view = FaceView::at(mode(false), &now(), &weather);
        let config = FaceConfig::default();
        let scene = Scene::compose(&view, &config);
        let layout = config.layout.resolve(false);

        let ops = scene.ops();
        assert_eq!(ops.len(), 7);
        assert_eq!(ops[0], DrawOp::Fill(rgb(config.palette.background)));
        assert!(matches!(ops[1], DrawOp::Text { text: "7:05", .. }));
        assert!(matches!(ops[2], DrawOp::Text { text: "Sat, Oct 17 2026", .. }));
        assert!(matches!(ops[3], DrawOp::Text { text: "21°", .. }));
        assert!(matches!(ops[4], DrawOp::Text { text: "12°", .. }));
        assert!(matches!(ops[5], DrawOp::Line { length: 60, .. }));
        match &ops[6] {
            DrawOp::Icon { at, size, .. } => {
                assert_eq!(*at, point(layout.icon.offset));
                assert_eq!(*size, layout.icon.size);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ambient_shows_time_only_on_black() {
        let weather = weather("21°", "12°", Some(icon(2, 2, 0xFFE0)));
        let view = FaceView::at(mode(true), &now(), &weather);
        let mut config = FaceConfig::default();
        config.palette.background = 0x224466;
        let scene = Scene::compose(&view, &config);

        let ops = scene.ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], DrawOp::Fill(Rgb565::BLACK));
        assert!(matches!(ops[1], DrawOp::Text { text: "7:05", .. }));
    }

    #[test]
    fn test_empty_snapshot_still_draws_weather_row() {
        let weather = WeatherSnapshot::default();
        let view = FaceView::at(mode(false), &now(), &weather);
        let scene = Scene::compose(&view, &FaceConfig::default());

        let ops = scene.ops();
        assert_eq!(ops.len(), 6);
        assert!(matches!(ops[3], DrawOp::Text { text: "", .. }));
        assert!(matches!(ops[4], DrawOp::Text { text: "", .. }));
        assert!(matches!(ops[5], DrawOp::Line { length: 60, .. }));
    }

    #[test]
    fn test_icon_without_temperatures() {
        let weather = WeatherSnapshot {
            high_temp: TempText::new(),
            low_temp: TempText::new(),
            icon: Some(icon(1, 1, 0)),
        };
        let view = FaceView::at(mode(false), &now(), &weather);
        let scene = Scene::compose(&view, &FaceConfig::default());
        assert_eq!(scene.ops().len(), 7);
        assert!(matches!(scene.ops()[6], DrawOp::Icon { .. }));
    }

    #[test]
    fn test_round_time_offset() {
        let weather = WeatherSnapshot::default();
        let mut round = mode(false);
        round.round = true;
        let view = FaceView::at(round, &now(), &weather);
        let config = FaceConfig::default();
        let scene = Scene::compose(&view, &config);

        match scene.ops()[1] {
            DrawOp::Text { at, size, .. } => {
                assert_eq!(at.x, config.layout.time.x_round as i32);
                assert_eq!(size, config.layout.time.size_round);
            }
            ref other => panic!("unexpected {:?}", other),
        }
    }

    fn low_bit_time_color(primary_text: u32) -> Rgb565 {
        let weather = WeatherSnapshot::default();
        let low_bit = FaceMode {
            ambient: true,
            antialias: false,
            round: false,
            utc_offset_s: 0,
        };
        let view = FaceView::at(low_bit, &now(), &weather);
        let mut config = FaceConfig::default();
        config.palette.primary_text = primary_text;
        let scene = Scene::compose(&view, &config);

        assert_eq!(scene.ops()[0], DrawOp::Fill(Rgb565::BLACK));
        match scene.ops()[1] {
            DrawOp::Text { color, .. } => color,
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_low_bit_text_is_white() {
        assert_eq!(low_bit_time_color(0xD0D0A0), Rgb565::WHITE);
    }

    #[test]
    fn test_low_bit_dark_primary_stays_visible() {
        // A dark primary must not vanish into the black background
        assert_eq!(low_bit_time_color(0x606060), Rgb565::WHITE);
        assert_eq!(low_bit_time_color(0x000000), Rgb565::WHITE);
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(0xFFFFFF), Rgb565::WHITE);
        assert_eq!(rgb(0x000000), Rgb565::BLACK);
        assert_eq!(rgb(0xFF0000), Rgb565::RED);
    }
}
