//! Accessible color palette
//!
//! Primary colors follow the accessible color cycles from
//! <https://github.com/mpetroff/accessible-color-cycles>.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use super::Rgb;

/// Named colors used across plots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    // Main
    /// `#5790fc`
    Blue,
    /// `#f89c20`
    Orange,
    /// `#e42536`
    Red,
    /// `#964a8b`
    Purple,
    /// `#9c9ca1`
    Gray,
    /// `#7a21dd`
    Violet,
    /// `#ffffff`
    White,
    /// `#14802d`
    Green,

    // Additional
    /// `#b9ac70`
    Moss,
    /// `#a96b59`
    Bronze,
    /// `#717581`
    Metal,
    /// `#92dadd`
    EggBlue,

    // Accents
    /// `#3b3b3b`
    DarkGray,
    /// `#bfbfbf`
    LightGray,
    /// `#dddddd`, for pushing elements into the background
    PushToBg,
    /// `#072ea5`
    DarkBlue,
    /// `#91c2ed`
    LightBlue,
    /// `#ff3e06`
    DarkOrange,
    /// `#fbb181`
    LightOrange,
    /// `#a50000`
    DarkRed,
    /// `#ea6466`
    LightRed,
    /// `#333333`
    SoftBlack,
}

impl Color {
    /// Colors of the default plotting cycle.
    pub const MAIN: [Self; 6] = [
        Self::Blue,
        Self::Orange,
        Self::Red,
        Self::Purple,
        Self::Gray,
        Self::Violet,
    ];

    /// Darker and lighter accents.
    pub const ACCENT: [Self; 9] = [
        Self::DarkGray,
        Self::LightGray,
        Self::DarkBlue,
        Self::LightBlue,
        Self::DarkOrange,
        Self::LightOrange,
        Self::DarkRed,
        Self::LightRed,
        Self::SoftBlack,
    ];

    /// RGB value of the color.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Blue => Rgb::new(0x57, 0x90, 0xfc),
            Self::Orange => Rgb::new(0xf8, 0x9c, 0x20),
            Self::Red => Rgb::new(0xe4, 0x25, 0x36),
            Self::Purple => Rgb::new(0x96, 0x4a, 0x8b),
            Self::Gray => Rgb::new(0x9c, 0x9c, 0xa1),
            Self::Violet => Rgb::new(0x7a, 0x21, 0xdd),
            Self::White => Rgb::new(0xff, 0xff, 0xff),
            Self::Green => Rgb::new(0x14, 0x80, 0x2d),
            Self::Moss => Rgb::new(0xb9, 0xac, 0x70),
            Self::Bronze => Rgb::new(0xa9, 0x6b, 0x59),
            Self::Metal => Rgb::new(0x71, 0x75, 0x81),
            Self::EggBlue => Rgb::new(0x92, 0xda, 0xdd),
            Self::DarkGray => Rgb::new(0x3b, 0x3b, 0x3b),
            Self::LightGray => Rgb::new(0xbf, 0xbf, 0xbf),
            Self::PushToBg => Rgb::new(0xdd, 0xdd, 0xdd),
            Self::DarkBlue => Rgb::new(0x07, 0x2e, 0xa5),
            Self::LightBlue => Rgb::new(0x91, 0xc2, 0xed),
            Self::DarkOrange => Rgb::new(0xff, 0x3e, 0x06),
            Self::LightOrange => Rgb::new(0xfb, 0xb1, 0x81),
            Self::DarkRed => Rgb::new(0xa5, 0x00, 0x00),
            Self::LightRed => Rgb::new(0xea, 0x64, 0x66),
            Self::SoftBlack => Rgb::new(0x33, 0x33, 0x33),
        }
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn hex(self) -> String {
        self.rgb().to_hex()
    }

    /// Hex values of the main cycle.
    #[must_use]
    pub fn main_colors() -> Vec<String> {
        Self::MAIN.iter().map(|c| c.hex()).collect()
    }

    /// Hex values of the accents.
    #[must_use]
    pub fn accent_colors() -> Vec<String> {
        Self::ACCENT.iter().map(|c| c.hex()).collect()
    }

    /// Main cycle followed by the accents.
    #[must_use]
    pub fn all_colors() -> Vec<String> {
        let mut palette = Self::main_colors();
        palette.extend(Self::accent_colors());
        palette
    }

    /// Every named color, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        color.rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::Blue.hex(), "#5790fc");
        assert_eq!(Color::LightGray.hex(), "#bfbfbf");
        assert_eq!(Color::DarkRed.hex(), "#a50000");
    }

    #[test]
    fn test_main_and_accent_groups() {
        assert_eq!(
            Color::main_colors(),
            vec!["#5790fc", "#f89c20", "#e42536", "#964a8b", "#9c9ca1", "#7a21dd"]
        );
        assert_eq!(Color::accent_colors().len(), 9);
        assert_eq!(Color::accent_colors()[0], "#3b3b3b");
        assert_eq!(Color::accent_colors()[8], "#333333");
    }

    #[test]
    fn test_all_colors_is_main_then_accent() {
        let all = Color::all_colors();
        assert_eq!(all.len(), 15);
        assert_eq!(all[..6], Color::main_colors()[..]);
        assert_eq!(all[6..], Color::accent_colors()[..]);
    }

    #[test]
    fn test_every_variant_listed() {
        assert_eq!(Color::all().count(), Color::COUNT);
        assert_eq!(Color::COUNT, 22);
    }
}
