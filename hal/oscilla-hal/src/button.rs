//! Push-button abstraction
//!
//! Buttons are wired either to ground with a pull-up (pressing pulls the line
//! low) or to the supply with a pull-down. [`Button`] folds that polarity into
//! a single [`PushButton::pressed`] query so callers never look at raw levels.

use crate::gpio::{InputPin, Pull};

/// Electrical level that means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed reads high (button to supply, pull-down bias)
    High,
    /// Pressed reads low (button to ground, pull-up bias)
    Low,
}

impl ActiveLevel {
    /// Active level implied by a pull configuration
    ///
    /// A pulled-up line can only be driven low by the button and vice versa.
    /// Floating inputs are treated as active high.
    pub fn for_pull(pull: Pull) -> Self {
        match pull {
            Pull::Up => ActiveLevel::Low,
            Pull::Down | Pull::None => ActiveLevel::High,
        }
    }
}

/// Logical button state
pub trait PushButton {
    /// Whether the button is held down right now
    fn pressed(&self) -> bool;
}

/// Input pin with a known active level
pub struct Button<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> Button<P> {
    /// Wrap a pin with an explicit active level
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Wrap a pin, deriving the active level from its pull configuration
    pub fn from_pull(pin: P) -> Self {
        let active = ActiveLevel::for_pull(pin.pull());
        Self { pin, active }
    }

    /// Active level in use
    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> PushButton for Button<P> {
    fn pressed(&self) -> bool {
        match self.active {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        }
    }
}

impl<T: PushButton + ?Sized> PushButton for &T {
    fn pressed(&self) -> bool {
        (**self).pressed()
    }
}
