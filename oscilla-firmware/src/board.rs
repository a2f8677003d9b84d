//! Nucleo-32 (STM32L432KC) board glue
//!
//! Pin map:
//!
//! | Function        | Arduino pin | MCU pin |
//! |-----------------|-------------|---------|
//! | TFT SCK         | A4          | PA5     |
//! | TFT MISO        | A5          | PA6     |
//! | TFT MOSI        | A6          | PA7     |
//! | TFT CS          | D11         | PB5     |
//! | TFT DC          | D12         | PB4     |
//! | Scale up        | A3          | PA4     |
//! | Scale down      | A2          | PA3     |
//!
//! Both buttons short to ground and use the internal pull-up.

use embassy_stm32::gpio::{Input, Pin, Pull as GpioPull};
use embassy_stm32::Peri;
use oscilla_hal::{Button, InputPin, Pull};

/// SPI clock for the TFT
pub const TFT_SPI_HZ: u32 = 8_000_000;

/// embassy input with the pull it was configured with
pub struct BoardInput<'d> {
    input: Input<'d>,
    pull: Pull,
}

impl<'d> BoardInput<'d> {
    pub fn new(input: Input<'d>, pull: Pull) -> Self {
        Self { input, pull }
    }
}

impl InputPin for BoardInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }

    fn pull(&self) -> Pull {
        self.pull
    }
}

/// Push button on a board input
pub type BoardButton<'d> = Button<BoardInput<'d>>;

/// Configure `pin` as an input with `pull` and wrap it as a button
///
/// The active level follows the pull (pull-up means active low).
pub fn button<'d>(pin: Peri<'d, impl Pin>, pull: Pull) -> BoardButton<'d> {
    let input = Input::new(pin, gpio_pull(pull));
    Button::from_pull(BoardInput::new(input, pull))
}

/// embassy pull matching a HAL pull
fn gpio_pull(pull: Pull) -> GpioPull {
    match pull {
        Pull::None => GpioPull::None,
        Pull::Up => GpioPull::Up,
        Pull::Down => GpioPull::Down,
    }
}
