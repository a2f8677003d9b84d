//! Build script for oscilla-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts (memory.x comes from embassy-stm32)
//! - Validates scope.toml at compile time

use std::fs;
use std::path::Path;

/// Palette names accepted for color keys
const COLOR_NAMES: [&str; 9] = [
    "black", "white", "red", "green", "blue", "yellow", "cyan", "magenta", "gray",
];

/// Longest label the layout can hold
const MAX_LABEL_LEN: usize = 16;

/// Most logo positions the firmware stores
const MAX_LOGO_POSITIONS: usize = 4;

/// Widest readout field in characters
const MAX_READOUT_DIGITS: i64 = 11;

fn main() {
    setup_linker();
    validate_config();
}

/// Linker arguments for the firmware binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate scope.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=scope.toml");

    let config_path = Path::new("scope.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: scope.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a scope.toml configuration file.            ║\n\
            ║  Please create one in the oscilla-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read scope.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in scope.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_scale(&config, &mut errors);
    validate_layout(&config, &mut errors);
    validate_logo(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid scope configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=scope.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [scale], [layout] and [logo] tables are allowed at the top level
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["scale", "layout", "logo"].contains(&name.as_str()) {
            errors.push(format!("unknown section or key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn validate_scale(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scale) = config.get("scale").and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in scale {
        match key.as_str() {
            "initial" | "factor" => match number(value) {
                Some(n) if n.is_finite() && n > 0.0 => {}
                Some(_) => errors.push(format!("[scale] {} must be greater than 0", key)),
                None => errors.push(format!("[scale] {} must be a number", key)),
            },
            "trigger" => {
                if !matches!(value.as_str(), Some("level" | "edge")) {
                    errors.push("[scale] trigger must be 'level' or 'edge'".to_string());
                }
            }
            other => errors.push(format!("[scale] unknown key '{}'", other)),
        }
    }
}

fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(layout) = config.get("layout").and_then(|l| l.as_table()) else {
        return;
    };

    for (key, value) in layout {
        match key.as_str() {
            "background" | "axis_color" | "wave_color" => {
                if !is_color(value) {
                    errors.push(format!("[layout] {} is not a known color or RGB565 value", key));
                }
            }
            "x_axis" | "y_axis" | "wave" | "label_at" | "readout_at" => {
                if !is_position(value) {
                    errors.push(format!("[layout] {} must be an [x, y] pair", key));
                }
            }
            "label" => match value.as_str() {
                Some(label) if label.len() <= MAX_LABEL_LEN => {}
                Some(_) => errors.push(format!(
                    "[layout] label is longer than {} bytes",
                    MAX_LABEL_LEN
                )),
                None => errors.push("[layout] label must be a string".to_string()),
            },
            "readout_digits" => match value.as_integer() {
                Some(d) if (1..=MAX_READOUT_DIGITS).contains(&d) => {}
                _ => errors.push(format!(
                    "[layout] readout_digits must be 1-{}",
                    MAX_READOUT_DIGITS
                )),
            },
            other => errors.push(format!("[layout] unknown key '{}'", other)),
        }
    }
}

fn validate_logo(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(logo) = config.get("logo").and_then(|l| l.as_table()) else {
        return;
    };

    for (key, value) in logo {
        match key.as_str() {
            "enabled" | "offset_x" => {
                if !value.is_bool() {
                    errors.push(format!("[logo] {} must be true or false", key));
                }
            }
            "positions" => match value.as_array() {
                Some(positions) if positions.len() > MAX_LOGO_POSITIONS => errors.push(format!(
                    "[logo] at most {} positions are supported",
                    MAX_LOGO_POSITIONS
                )),
                Some(positions) => {
                    for (i, position) in positions.iter().enumerate() {
                        if !is_position(position) {
                            errors.push(format!("[logo] position {} must be an [x, y] pair", i));
                        }
                    }
                }
                None => errors.push("[logo] positions must be an array".to_string()),
            },
            "alignment" => {
                if !matches!(value.as_str(), Some("packed" | "dword")) {
                    errors.push("[logo] alignment must be 'packed' or 'dword'".to_string());
                }
            }
            other => errors.push(format!("[logo] unknown key '{}'", other)),
        }
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn is_color(value: &toml::Value) -> bool {
    match value {
        toml::Value::String(name) => COLOR_NAMES.contains(&name.to_ascii_lowercase().as_str()),
        toml::Value::Integer(raw) => (0..=0xFFFF).contains(raw),
        _ => false,
    }
}

fn is_position(value: &toml::Value) -> bool {
    match value.as_array() {
        Some(pair) => {
            pair.len() == 2
                && pair
                    .iter()
                    .all(|v| v.as_integer().is_some_and(|n| i32::try_from(n).is_ok()))
        }
        None => false,
    }
}
