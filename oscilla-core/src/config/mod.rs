//! Configuration types
//!
//! Board-agnostic scope configuration. Defaults reproduce the stock demo
//! layout for a 240x320 panel; firmware may override them from an embedded
//! TOML file via [`parse_config`].

pub mod parse;

pub use parse::{parse_config, ConfigError};

use heapless::{String, Vec};
use oscilla_display::Rgb565;

use crate::bmp::RowAlignment;
use crate::scope::state::INITIAL_SCALE;
use crate::scope::TriggerMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum number of places the logo is drawn at
pub const MAX_LOGO_POSITIONS: usize = 4;

/// Widest readout field in characters
pub const MAX_READOUT_DIGITS: u8 = 11;

/// Pixel position on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Time base behavior
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleConfig {
    /// Scale at power-on
    pub initial: f64,
    /// Multiplier applied per scale-up, divisor per scale-down
    pub factor: f64,
    /// How button samples turn into transitions
    pub trigger: TriggerMode,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            initial: INITIAL_SCALE,
            factor: 2.0,
            trigger: TriggerMode::Level,
        }
    }
}

/// Where and how the scope screen is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScopeLayout {
    /// Screen clear color
    pub background: Rgb565,
    /// Origin of the horizontal axis
    pub x_axis: Position,
    /// Origin of the vertical axis
    pub y_axis: Position,
    /// Axis color
    pub axis_color: Rgb565,
    /// Baseline origin of the waveform
    pub wave: Position,
    /// Waveform color
    pub wave_color: Rgb565,
    /// Unit label text
    pub label: String<MAX_LABEL_LEN>,
    /// Unit label position
    pub label_at: Position,
    /// Interval readout position
    pub readout_at: Position,
    /// Interval readout width in characters
    pub readout_digits: u8,
}

impl Default for ScopeLayout {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str("us/d");

        Self {
            background: Rgb565::BLACK,
            x_axis: Position::new(0, 20),
            y_axis: Position::new(0, 0),
            axis_color: Rgb565::WHITE,
            wave: Position::new(0, 140),
            wave_color: Rgb565::YELLOW,
            label,
            label_at: Position::new(10, 200),
            readout_at: Position::new(10, 215),
            readout_digits: 4,
        }
    }
}

/// Embedded logo placement
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogoConfig {
    /// Whether the logo is drawn during the splash sequence
    pub enabled: bool,
    /// Placement offsets, drawn in order
    pub positions: Vec<Position, MAX_LOGO_POSITIONS>,
    /// Scanline layout of the embedded image
    pub alignment: RowAlignment,
    /// Shift the logo horizontally by each position's `x`
    pub offset_x: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        let mut positions = Vec::new();
        let _ = positions.push(Position::new(0, 0));
        let _ = positions.push(Position::new(0, 130));

        Self {
            enabled: true,
            positions,
            alignment: RowAlignment::Packed,
            offset_x: false,
        }
    }
}

/// Complete scope configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScopeConfig {
    pub scale: ScaleConfig,
    pub layout: ScopeLayout,
    pub logo: LogoConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_stock_demo() {
        let layout = ScopeLayout::default();
        assert_eq!(layout.x_axis, Position::new(0, 20));
        assert_eq!(layout.y_axis, Position::new(0, 0));
        assert_eq!(layout.wave, Position::new(0, 140));
        assert_eq!(layout.label.as_str(), "us/d");
        assert_eq!(layout.label_at, Position::new(10, 200));
        assert_eq!(layout.readout_at, Position::new(10, 215));
        assert_eq!(layout.readout_digits, 4);
        assert_eq!(layout.wave_color, Rgb565::YELLOW);
    }

    #[test]
    fn test_default_scale() {
        let scale = ScaleConfig::default();
        assert_eq!(scale.initial, 1.0);
        assert_eq!(scale.factor, 2.0);
        assert_eq!(scale.trigger, TriggerMode::Level);
    }

    #[test]
    fn test_default_logo_positions() {
        let logo = LogoConfig::default();
        assert!(logo.enabled);
        assert_eq!(
            logo.positions.as_slice(),
            &[Position::new(0, 0), Position::new(0, 130)]
        );
    }
}
