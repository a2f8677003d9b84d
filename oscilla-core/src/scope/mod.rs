//! Waveform scope
//!
//! The scope shows a waveform whose time base is stretched or squeezed by
//! two buttons. Every change redraws the whole screen: axes, waveform, and
//! the microseconds-per-division readout.

pub mod controller;
pub mod state;

pub use controller::{draw_scope, readout_value, PollOutcome, ScaleController, TriggerMode};
pub use state::{interval_micros, ScaleEvent, WaveState};
