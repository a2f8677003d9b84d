//! Packed 16-bit color
//!
//! TFT panels in 16-bit mode take RGB565: 5 bits red, 6 bits green,
//! 5 bits blue, red in the most significant bits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB565 color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const GRAY: Self = Self(0x8410);

    /// Wrap an already packed value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Pack 8-bit channels, dropping the low bits of each
    pub const fn from_rgb888(red: u8, green: u8, blue: u8) -> Self {
        let r5 = (red >> 3) as u16;
        let g6 = (green >> 2) as u16;
        let b5 = (blue >> 3) as u16;
        Self((r5 << 11) | (g6 << 5) | b5)
    }

    /// Packed value as sent to the panel
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 5-bit red channel
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Look up a palette color by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        const PALETTE: [(&str, Rgb565); 9] = [
            ("black", Rgb565::BLACK),
            ("white", Rgb565::WHITE),
            ("red", Rgb565::RED),
            ("green", Rgb565::GREEN),
            ("blue", Rgb565::BLUE),
            ("yellow", Rgb565::YELLOW),
            ("cyan", Rgb565::CYAN),
            ("magenta", Rgb565::MAGENTA),
            ("gray", Rgb565::GRAY),
        ];

        PALETTE
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}
