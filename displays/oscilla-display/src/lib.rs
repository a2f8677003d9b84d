//! Render sink abstraction and shared drawing components for Oscilla
//!
//! This crate provides:
//! - `RenderSink` trait, the fixed set of primitives the scope and the bitmap
//!   blitter draw through (pixels, text, shapes, axes, waveform, numbers)
//! - `Rgb565` packed color type and the panel palette
//! - `GraphicsSink`, an implementation of `RenderSink` on top of any
//!   `embedded-graphics` draw target
//!
//! # Architecture
//!
//! Core logic never talks to a panel directly. Firmware builds a panel driver
//! that implements `embedded_graphics::DrawTarget`, wraps it in a
//! `GraphicsSink`, and hands that to the scope controller and the blitter.
//! Host tests substitute a recording sink.

#![no_std]

pub mod backend;
pub mod color;
pub mod graphics;

// Re-export key types
pub use backend::{DisplayError, RenderSink};
pub use color::Rgb565;
pub use graphics::GraphicsSink;
