//! Board-agnostic core logic for the Oscilla TFT scope
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - BMP header parsing and RGB565 blitting to a render sink
//! - Waveform scale state and the button-driven redraw controller
//! - Scope configuration types and their TOML-subset parser

#![no_std]
#![deny(unsafe_code)]

pub mod bmp;
pub mod config;
pub mod scope;

#[cfg(test)]
mod testing;
