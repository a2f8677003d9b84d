//! Oscilla Hardware Abstraction Layer
//!
//! This crate defines the input traits the scope logic reads buttons
//! through. Chip-specific firmware wraps its own pin types and implements
//! [`gpio::InputPin`]; everything above this layer only asks whether a
//! button is pressed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  oscilla-core (scale controller)        │
//! └─────────────────────────────────────────┘
//!                     │  PushButton::pressed()
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oscilla-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │  InputPin::is_high()
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oscilla-firmware (board pins)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Raw digital input level
//! - [`button::PushButton`] - Logical press state, polarity already applied

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use button::{ActiveLevel, Button, PushButton};
pub use gpio::{InputPin, Pull};
