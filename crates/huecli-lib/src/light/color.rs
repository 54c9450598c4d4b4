//! Named color table for Hue lights.
//!
//! Colors are expressed in the bridge's native HSB space: hue `0..=65535`,
//! saturation and brightness `0..=254`. A nonzero `color_temperature` (mired)
//! is written after the HSB triple; zero means "leave it alone".

use std::fmt;

use serde::Serialize;

/// Maximum brightness and saturation value accepted by the bridge.
pub const MAX_LEVEL: u8 = 254;

/// An immutable HSB + color temperature quadruple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub hue: u16,
    pub saturation: u8,
    pub brightness: u8,
    /// Color temperature in mired. `0` = not applicable.
    pub color_temperature: u16,
}

impl Color {
    const fn hsb(hue: u16, saturation: u8, brightness: u8) -> Self {
        Color {
            hue,
            saturation,
            brightness,
            color_temperature: 0,
        }
    }

    const fn temperature(brightness: u8, color_temperature: u16) -> Self {
        Color {
            hue: 0,
            saturation: 0,
            brightness,
            color_temperature,
        }
    }

    /// Copy of this color with brightness replaced by a percentage.
    ///
    /// `0` keeps the table brightness; anything above 100 is treated as 100.
    pub fn with_brightness_percent(self, percent: u8) -> Self {
        if percent == 0 {
            return self;
        }
        Color {
            brightness: brightness_from_percent(percent),
            ..self
        }
    }
}

/// The fixed set of colors the CLI knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    White,
    Mood,
}

impl ColorName {
    pub const ALL: [ColorName; 10] = [
        ColorName::Red,
        ColorName::Orange,
        ColorName::Yellow,
        ColorName::Green,
        ColorName::Cyan,
        ColorName::Blue,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::White,
        ColorName::Mood,
    ];

    /// Case-insensitive lookup. Surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Orange => "orange",
            ColorName::Yellow => "yellow",
            ColorName::Green => "green",
            ColorName::Cyan => "cyan",
            ColorName::Blue => "blue",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::White => "white",
            ColorName::Mood => "mood",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            ColorName::Red => Color::hsb(65535, MAX_LEVEL, MAX_LEVEL),
            ColorName::Orange => Color::hsb(6800, MAX_LEVEL, MAX_LEVEL),
            ColorName::Yellow => Color::hsb(10900, MAX_LEVEL, MAX_LEVEL),
            ColorName::Green => Color::hsb(24400, MAX_LEVEL, MAX_LEVEL),
            ColorName::Cyan => Color::hsb(41600, MAX_LEVEL, MAX_LEVEL),
            ColorName::Blue => Color::hsb(46000, MAX_LEVEL, MAX_LEVEL),
            ColorName::Purple => Color::hsb(48500, MAX_LEVEL, MAX_LEVEL),
            ColorName::Pink => Color::hsb(59800, MAX_LEVEL, MAX_LEVEL),
            ColorName::White => Color::temperature(MAX_LEVEL, 1),
            ColorName::Mood => Color::temperature(MAX_LEVEL, 550),
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a color name to its table value.
///
/// Never fails: unknown names (including the empty string) resolve to white.
pub fn resolve_color(name: &str) -> Color {
    let color = ColorName::from_name(name).unwrap_or_else(|| {
        if !name.trim().is_empty() {
            log::warn!("unknown color {name:?}, using white");
        }
        ColorName::White
    });
    color.color()
}

/// Convert a 1–100 percentage to a bridge brightness level, rounding to nearest.
pub fn brightness_from_percent(percent: u8) -> u8 {
    let percent = u32::from(percent.min(100));
    let level = (percent * u32::from(MAX_LEVEL) + 50) / 100;
    // level <= 254 because percent <= 100
    level as u8
}
