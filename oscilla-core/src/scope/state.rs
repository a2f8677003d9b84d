//! Time base state
//!
//! A single scale factor and the per-division interval derived from it.
//! The scale is deliberately unbounded: repeated presses keep doubling or
//! halving it with no clamp in either direction.

/// Microseconds spanned by the screen at scale 1.0
pub const MICROS_PER_SCREEN: f64 = 1000.0;

/// Horizontal divisions on the screen
pub const DIVISIONS: f64 = 8.0;

/// Scale the scope starts at
pub const INITIAL_SCALE: f64 = 1.0;

/// Direction of a time base change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScaleEvent {
    /// Stretch the time base (multiply by the step factor)
    Up,
    /// Squeeze the time base (divide by the step factor)
    Down,
}

/// Interval represented by one division at `scale`
pub fn interval_micros(scale: f64) -> f64 {
    scale * MICROS_PER_SCREEN / DIVISIONS
}

/// Current time base
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveState {
    scale: f64,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveState {
    /// State at the initial scale of 1.0
    pub const fn new() -> Self {
        Self {
            scale: INITIAL_SCALE,
        }
    }

    /// State at an arbitrary starting scale
    ///
    /// Returns `None` unless `scale` is finite and strictly positive.
    pub fn with_scale(scale: f64) -> Option<Self> {
        if scale.is_finite() && scale > 0.0 {
            Some(Self { scale })
        } else {
            None
        }
    }

    /// Current scale factor
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Microseconds per division at the current scale
    pub fn interval_micros(&self) -> f64 {
        interval_micros(self.scale)
    }

    /// Apply a time base change with the given step factor
    pub fn apply(&mut self, event: ScaleEvent, factor: f64) {
        match event {
            ScaleEvent::Up => self.scale *= factor,
            ScaleEvent::Down => self.scale /= factor,
        }
    }
}
