//! GPIO pin abstractions
//!
//! Provides the digital input trait implemented by board firmware.

/// Internal bias applied to an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Weak pull-up, line idles high
    Up,
    /// Weak pull-down, line idles low
    Down,
}

impl Pull {
    /// Level the line rests at when nothing drives it
    ///
    /// Returns `None` for a floating input.
    pub fn idle_high(&self) -> Option<bool> {
        match self {
            Pull::None => None,
            Pull::Up => Some(true),
            Pull::Down => Some(false),
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Pull configuration the pin was set up with
    fn pull(&self) -> Pull {
        Pull::None
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }

    fn pull(&self) -> Pull {
        (**self).pull()
    }
}
