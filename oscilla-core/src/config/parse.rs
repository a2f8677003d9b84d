//! Minimal TOML parser for scope configuration
//!
//! Handles only the subset the scope configuration uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - `[section]` headers (`scale`, `layout`, `logo`)
//! - Key = value pairs (float, integer incl. `0x` hex, string, boolean)
//! - Coordinate pairs `[x, y]` and lists of pairs `[[x, y], [x, y]]`
//! - Comments (# ...)
//!
//! NOT supported:
//! - Escapes or multi-line strings
//! - Dotted keys, inline tables, arrays of tables

use heapless::Vec;
use oscilla_display::Rgb565;

use super::{
    LogoConfig, Position, ScaleConfig, ScopeConfig, ScopeLayout, MAX_LOGO_POSITIONS,
    MAX_READOUT_DIGITS,
};
use crate::bmp::RowAlignment;
use crate::scope::TriggerMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or syntax
    InvalidValue,
    /// Value parsed but lies outside the accepted range
    OutOfRange,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Scale,
    Layout,
    Logo,
}

/// Parse TOML configuration into a [`ScopeConfig`]
///
/// Keys that are not present keep their default values.
pub fn parse_config(input: &str) -> Result<ScopeConfig, ConfigError> {
    let mut config = ScopeConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let key = key.trim();
        let value = value.trim();

        match section {
            Section::Root => return Err(ConfigError::UnknownKey),
            Section::Scale => apply_scale(&mut config.scale, key, value)?,
            Section::Layout => apply_layout(&mut config.layout, key, value)?,
            Section::Logo => apply_logo(&mut config.logo, key, value)?,
        }
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ConfigError> {
    match name.trim() {
        "scale" => Ok(Section::Scale),
        "layout" => Ok(Section::Layout),
        "logo" => Ok(Section::Logo),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_scale(scale: &mut ScaleConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "initial" => scale.initial = parse_float(value)?,
        "factor" => scale.factor = parse_float(value)?,
        "trigger" => {
            scale.trigger = match parse_string(value)? {
                "level" => TriggerMode::Level,
                "edge" => TriggerMode::Edge,
                _ => return Err(ConfigError::InvalidValue),
            }
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_layout(layout: &mut ScopeLayout, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "background" => layout.background = parse_color(value)?,
        "axis_color" => layout.axis_color = parse_color(value)?,
        "wave_color" => layout.wave_color = parse_color(value)?,
        "x_axis" => layout.x_axis = parse_pair(value)?,
        "y_axis" => layout.y_axis = parse_pair(value)?,
        "wave" => layout.wave = parse_pair(value)?,
        "label_at" => layout.label_at = parse_pair(value)?,
        "readout_at" => layout.readout_at = parse_pair(value)?,
        "readout_digits" => layout.readout_digits = parse_int(value)?,
        "label" => {
            layout.label.clear();
            layout
                .label
                .push_str(parse_string(value)?)
                .map_err(|_| ConfigError::TooManyItems)?;
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_logo(logo: &mut LogoConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "enabled" => logo.enabled = parse_bool(value)?,
        "positions" => logo.positions = parse_pairs(value)?,
        "offset_x" => logo.offset_x = parse_bool(value)?,
        "alignment" => {
            logo.alignment = match parse_string(value)? {
                "packed" => RowAlignment::Packed,
                "dword" => RowAlignment::Dword,
                _ => return Err(ConfigError::InvalidValue),
            }
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn validate(config: &ScopeConfig) -> Result<(), ConfigError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(config.scale.initial) || !positive(config.scale.factor) {
        return Err(ConfigError::OutOfRange);
    }
    if !(1..=MAX_READOUT_DIGITS).contains(&config.layout.readout_digits) {
        return Err(ConfigError::OutOfRange);
    }
    Ok(())
}

/// Cut a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_float(value: &str) -> Result<f64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Decimal or `0x` hex integer with at most one leading sign
fn parse_int<T: TryFrom<i128>>(value: &str) -> Result<T, ConfigError> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let (radix, digits) = match unsigned.strip_prefix("0x") {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ConfigError::InvalidValue);
    }

    let magnitude =
        i128::from(u64::from_str_radix(digits, radix).map_err(|_| ConfigError::OutOfRange)?);
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).map_err(|_| ConfigError::OutOfRange)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

/// Color by palette name (`"yellow"`) or packed RGB565 integer (`0xFFE0`)
fn parse_color(value: &str) -> Result<Rgb565, ConfigError> {
    if value.starts_with('"') {
        Rgb565::from_name(parse_string(value)?).ok_or(ConfigError::InvalidValue)
    } else {
        parse_int::<u16>(value).map(Rgb565::new)
    }
}

fn parse_pair(value: &str) -> Result<Position, ConfigError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue)?;
    let (x, y) = inner.split_once(',').ok_or(ConfigError::InvalidValue)?;
    Ok(Position::new(parse_int(x.trim())?, parse_int(y.trim())?))
}

fn parse_pairs(value: &str) -> Result<Vec<Position, MAX_LOGO_POSITIONS>, ConfigError> {
    let mut rest = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue)?
        .trim();

    let mut positions = Vec::new();
    while !rest.is_empty() {
        let end = rest.find(']').ok_or(ConfigError::InvalidValue)?;
        let pair = parse_pair(&rest[..=end])?;
        positions
            .push(pair)
            .map_err(|_| ConfigError::TooManyItems)?;

        rest = rest[end + 1..].trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma.trim_start();
        } else if !rest.is_empty() {
            return Err(ConfigError::InvalidValue);
        }
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCK: &str = r#"
# Stock demo layout
[scale]
initial = 1.0
factor = 2.0
trigger = "level"

[layout]
background = "black"
axis_color = "white"
x_axis = [0, 20]
y_axis = [0, 0]
wave = [0, 140]
wave_color = "yellow"
label = "us/d"          # units of the readout
label_at = [10, 200]
readout_at = [10, 215]
readout_digits = 4

[logo]
enabled = true
positions = [[0, 0], [0, 130]]
offset_x = false
alignment = "packed"
"#;

    #[test]
    fn test_stock_file_equals_defaults() {
        let config = parse_config(STOCK).unwrap();
        assert_eq!(config, ScopeConfig::default());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ScopeConfig::default());
    }

    #[test]
    fn test_overrides() {
        let input = r#"
[scale]
factor = 4
trigger = "edge"

[layout]
wave_color = 0x07E0
wave = [5, -12]
label = "ms/div"

[logo]
positions = []
offset_x = true
alignment = "dword"
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.scale.factor, 4.0);
        assert_eq!(config.scale.trigger, TriggerMode::Edge);
        assert_eq!(config.layout.wave_color, Rgb565::GREEN);
        assert_eq!(config.layout.wave, Position::new(5, -12));
        assert_eq!(config.layout.label.as_str(), "ms/div");
        assert!(config.logo.positions.is_empty());
        assert_eq!(config.logo.alignment, RowAlignment::Dword);
        assert!(config.logo.offset_x);
    }

    #[test]
    fn test_hash_inside_string_kept() {
        let config = parse_config("[layout]\nlabel = \"#/div\" # comment").unwrap();
        assert_eq!(config.layout.label.as_str(), "#/div");
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[jars]\nname = \"x\""),
            Err(ConfigError::InvalidSection)
        );
    }

    #[test]
    fn test_unknown_and_root_keys() {
        assert_eq!(parse_config("color = 1"), Err(ConfigError::UnknownKey));
        assert_eq!(
            parse_config("[scale]\nspeed = 1"),
            Err(ConfigError::UnknownKey)
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[scale]\nfactor = fast"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[layout]\nwave = [1 2]"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[layout]\naxis_color = \"plaid\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[logo]\nenabled = yes"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[scale]\ninitial"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            parse_config("[scale]\ninitial = 0"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[scale]\nfactor = -2.0"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nreadout_digits = 0"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nreadout_digits = 300"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nbackground = 0x10000"),
            Err(ConfigError::OutOfRange)
        );
    }

    #[test]
    fn test_integer_signs() {
        let config = parse_config("[layout]\nwave = [-0x10, +7]").unwrap();
        assert_eq!(config.layout.wave, Position::new(-16, 7));

        for input in [
            "[layout]\nwave = [--5, 0]",
            "[layout]\nwave = [+-5, 0]",
            "[layout]\nwave = [-+5, 0]",
            "[layout]\nwave = [0x-5, 0]",
            "[layout]\nwave = [0x+5, 0]",
            "[layout]\nwave = [-, 0]",
        ] {
            assert_eq!(parse_config(input), Err(ConfigError::InvalidValue), "{}", input);
        }
    }

    #[test]
    fn test_integer_extremes_do_not_panic() {
        assert_eq!(
            parse_config("[layout]\nwave = [--9223372036854775808, 0]"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[layout]\nwave = [-9223372036854775808, 0]"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nwave = [-18446744073709551615, 0]"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nwave = [99999999999999999999999, 0]"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[layout]\nwave = [-2147483648, 2147483647]")
                .unwrap()
                .layout
                .wave,
            Position::new(i32::MIN, i32::MAX)
        );
    }

    #[test]
    fn test_capacity_limits() {
        assert_eq!(
            parse_config("[layout]\nlabel = \"far too long for a label\""),
            Err(ConfigError::TooManyItems)
        );
        assert_eq!(
            parse_config("[logo]\npositions = [[0,0],[1,1],[2,2],[3,3],[4,4]]"),
            Err(ConfigError::TooManyItems)
        );
    }
}
