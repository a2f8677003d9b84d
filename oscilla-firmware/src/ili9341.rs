//! ILI9341 TFT Display Driver
//!
//! Blocking driver for 240x320 ILI9341 panels on a 4-wire SPI bus
//! (separate chip select and data/command lines). Pixels are written
//! straight to panel RAM; there is no frame buffer.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel dimensions in portrait orientation
pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 320;

/// Pixels pushed per SPI write when filling an area
const FILL_CHUNK: usize = 32;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SOFTWARE_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const GAMMA_SET: u8 = 0x26;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const PAGE_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT_SET: u8 = 0x3A;
    pub const FRAME_RATE_CONTROL: u8 = 0xB1;
    pub const DISPLAY_FUNCTION_CONTROL: u8 = 0xB6;
    pub const POWER_CONTROL_1: u8 = 0xC0;
    pub const POWER_CONTROL_2: u8 = 0xC1;
    pub const VCOM_CONTROL_1: u8 = 0xC5;
    pub const VCOM_CONTROL_2: u8 = 0xC7;
}

/// MADCTL: column address order mirrored, BGR panel
const MADCTL_PORTRAIT: u8 = 0x48;

/// COLMOD: 16 bits per pixel on both interfaces
const PIXEL_FORMAT_16BIT: u8 = 0x55;

/// Register setup sent after reset
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::POWER_CONTROL_1, &[0x23]),
    (cmd::POWER_CONTROL_2, &[0x10]),
    (cmd::VCOM_CONTROL_1, &[0x3E, 0x28]),
    (cmd::VCOM_CONTROL_2, &[0x86]),
    (cmd::MEMORY_ACCESS_CONTROL, &[MADCTL_PORTRAIT]),
    (cmd::PIXEL_FORMAT_SET, &[PIXEL_FORMAT_16BIT]),
    (cmd::FRAME_RATE_CONTROL, &[0x00, 0x18]),
    (cmd::DISPLAY_FUNCTION_CONTROL, &[0x08, 0x82, 0x27]),
    (cmd::GAMMA_SET, &[0x01]),
];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI transfer failed
    Spi,
    /// Chip select or data/command pin could not be driven
    Pin,
}

/// ILI9341 driver
pub struct Ili9341<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> Ili9341<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new driver; call [`init`](Self::init) before drawing
    pub fn new(spi: SPI, cs: CS, dc: DC) -> Self {
        Self { spi, cs, dc }
    }

    /// Reset the controller and bring the panel out of sleep
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.cs.set_high().map_err(|_| Error::Pin)?;

        self.command(cmd::SOFTWARE_RESET, &[])?;
        delay.delay_ms(150);

        for &(command, params) in INIT_SEQUENCE {
            self.command(command, params)?;
        }

        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPLAY_ON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }

    /// Send a command with its parameter bytes
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        self.transaction(command, |spi| spi.write(params))
    }

    /// Run one chip-select framed command followed by its data phase
    fn transaction<F>(&mut self, command: u8, data: F) -> Result<(), Error>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = Self::exchange(&mut self.spi, &mut self.dc, command, data);
        // Deselect even if the transfer failed
        self.cs.set_high().map_err(|_| Error::Pin)?;
        result
    }

    fn exchange<F>(spi: &mut SPI, dc: &mut DC, command: u8, data: F) -> Result<(), Error>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        dc.set_low().map_err(|_| Error::Pin)?;
        spi.write(&[command])
            .and_then(|_| spi.flush())
            .map_err(|_| Error::Spi)?;

        dc.set_high().map_err(|_| Error::Pin)?;
        data(spi).and_then(|_| spi.flush()).map_err(|_| Error::Spi)
    }

    /// Restrict RAM writes to the inclusive window (x0, y0)..=(x1, y1)
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        self.command(cmd::COLUMN_ADDRESS_SET, &[x0h, x0l, x1h, x1l])?;

        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::PAGE_ADDRESS_SET, &[y0h, y0l, y1h, y1l])
    }

    /// Fill the current window with `count` pixels of one color
    fn write_repeated(&mut self, color: Rgb565, count: usize) -> Result<(), Error> {
        let [high, low] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = high;
            pair[1] = low;
        }

        self.transaction(cmd::MEMORY_WRITE, |spi| {
            let mut remaining = count;
            while remaining > 0 {
                let pixels = remaining.min(FILL_CHUNK);
                spi.write(&chunk[..pixels * 2])?;
                remaining -= pixels;
            }
            Ok(())
        })
    }
}

impl<SPI, CS, DC> OriginDimensions for Ili9341<SPI, CS, DC> {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl<SPI, CS, DC> DrawTarget for Ili9341<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();

        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            let bytes = color.into_storage().to_be_bytes();
            self.transaction(cmd::MEMORY_WRITE, |spi| spi.write(&bytes))?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_repeated(color, (area.size.width * area.size.height) as usize)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}
