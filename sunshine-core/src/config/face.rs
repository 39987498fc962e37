//! Watch face configuration
//!
//! Parsed from `watchface.toml` at build time and embedded in the firmware
//! as postcard-serialized binary data. Every section has defaults, so a
//! partial file is valid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Screen has a zero dimension
    EmptyScreen,
    /// Named element is anchored outside the screen
    OffScreen(&'static str),
    /// Icon size of zero
    ZeroIconSize,
    /// Companion request timeout of zero
    ZeroRequestTimeout,
}

/// Colors as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    /// Interactive background (ambient is always black)
    pub background: u32,
    /// Time and high temperature
    pub primary_text: u32,
    /// Date, low temperature and separator
    pub secondary_text: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: 0x03A9F4,
            primary_text: 0xFFFFFF,
            secondary_text: 0xB3E5FC,
        }
    }
}

/// Screen position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub x: i16,
    pub y: i16,
}

impl Offset {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Text size, mapped to a font by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

/// Anchor and size of a text element; the anchor is the left end of the
/// text baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextSlot {
    pub offset: Offset,
    pub size: FontSize,
}

/// Horizontal separator between date and weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeparatorSlot {
    pub offset: Offset,
    pub length: u16,
}

/// Weather icon placement; the icon is scaled uniformly to `size` pixels wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IconSlot {
    pub offset: Offset,
    pub size: u16,
}

/// Time placement, which differs between round and square screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeLayout {
    pub y: i16,
    pub x_square: i16,
    pub x_round: i16,
    pub size_square: FontSize,
    pub size_round: FontSize,
}

impl Default for TimeLayout {
    fn default() -> Self {
        Self {
            y: 84,
            x_square: 72,
            x_round: 80,
            size_square: FontSize::Huge,
            size_round: FontSize::Large,
        }
    }
}

/// Element placement for both screen shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub time: TimeLayout,
    pub date: TextSlot,
    pub separator: SeparatorSlot,
    pub high: TextSlot,
    pub low: TextSlot,
    pub icon: IconSlot,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            time: TimeLayout::default(),
            date: TextSlot {
                offset: Offset::new(40, 114),
                size: FontSize::Medium,
            },
            separator: SeparatorSlot {
                offset: Offset::new(90, 134),
                length: 60,
            },
            high: TextSlot {
                offset: Offset::new(100, 184),
                size: FontSize::Large,
            },
            low: TextSlot {
                offset: Offset::new(160, 184),
                size: FontSize::Medium,
            },
            icon: IconSlot {
                offset: Offset::new(36, 150),
                size: 48,
            },
        }
    }
}

/// Layout resolved for one screen shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    pub time: TextSlot,
    pub date: TextSlot,
    pub separator: SeparatorSlot,
    pub high: TextSlot,
    pub low: TextSlot,
    pub icon: IconSlot,
}

impl LayoutConfig {
    /// Pick the time offset and size for a round or square screen
    pub fn resolve(&self, round: bool) -> Layout {
        let time = if round {
            TextSlot {
                offset: Offset::new(self.time.x_round, self.time.y),
                size: self.time.size_round,
            }
        } else {
            TextSlot {
                offset: Offset::new(self.time.x_square, self.time.y),
                size: self.time.size_square,
            }
        };
        Layout {
            time,
            date: self.date,
            separator: self.separator,
            high: self.high,
            low: self.low,
            icon: self.icon,
        }
    }
}

/// Panel properties reported to the face at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScreenConfig {
    pub width: u16,
    pub height: u16,
    /// Circular panel (selects the round time layout)
    pub round: bool,
    /// Panel loses color depth in ambient mode
    pub low_bit_ambient: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            round: false,
            low_bit_ambient: false,
        }
    }
}

/// Ambient mode entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmbientConfig {
    /// Seconds without input before entering ambient mode (0 = never)
    pub timeout_s: u16,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self { timeout_s: 15 }
    }
}

/// How the phone is chosen among connected peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PeerSelection {
    /// First peer flagged nearby, else the last one enumerated
    #[default]
    PreferNearby,
    /// Always the last peer enumerated
    LastEnumerated,
}

/// Companion link behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompanionConfig {
    pub peer_selection: PeerSelection,
    /// Time to wait for each response before giving up
    pub request_timeout_ms: u32,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            peer_selection: PeerSelection::PreferNearby,
            request_timeout_ms: 2000,
        }
    }
}

/// Complete watch face configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    pub screen: ScreenConfig,
    pub palette: Palette,
    pub layout: LayoutConfig,
    pub ambient: AmbientConfig,
    pub companion: CompanionConfig,
}

impl FaceConfig {
    /// Check the configuration for values that cannot be rendered or used
    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = &self.screen;
        if screen.width == 0 || screen.height == 0 {
            return Err(ConfigError::EmptyScreen);
        }

        let layout = &self.layout;
        let anchors = [
            ("time (square)", Offset::new(layout.time.x_square, layout.time.y)),
            ("time (round)", Offset::new(layout.time.x_round, layout.time.y)),
            ("date", layout.date.offset),
            ("separator", layout.separator.offset),
            ("high", layout.high.offset),
            ("low", layout.low.offset),
            ("icon", layout.icon.offset),
        ];
        for (name, offset) in anchors {
            let inside = offset.x >= 0
                && offset.y >= 0
                && (offset.x as u16) < screen.width
                && (offset.y as u16) < screen.height;
            if !inside {
                return Err(ConfigError::OffScreen(name));
            }
        }

        if layout.icon.size == 0 {
            return Err(ConfigError::ZeroIconSize);
        }
        if self.companion.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}
