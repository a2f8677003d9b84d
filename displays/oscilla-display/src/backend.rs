//! Render sink trait
//!
//! Defines the drawing primitives offered by the TFT driver layer.

use crate::color::Rgb565;

/// Render sink errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Drawing was attempted before `init`
    NotInitialized,
}

/// Drawing primitives of a TFT panel
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Calls are blocking; one call completes before the next begins.
pub trait RenderSink {
    /// Make the panel ready for drawing
    ///
    /// Drawing calls made before `init` fail with
    /// [`DisplayError::NotInitialized`].
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Fill the whole panel with one color
    fn clear_screen(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Write a single pixel
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Draw a rectangle outline between two opposite corners
    fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw a circle outline around `(x, y)`
    fn draw_circle(&mut self, x: i32, y: i32, radius: u32, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Draw a triangle outline
    #[allow(clippy::too_many_arguments)]
    fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw the horizontal axis starting at `(x, y)`
    fn draw_x_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw the vertical axis starting at `(x, y)`
    fn draw_y_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw a waveform whose baseline starts at `(x, y)`
    ///
    /// `scale` is the time base multiplier: larger values fit more periods
    /// on screen.
    fn draw_wave(&mut self, x: i32, y: i32, color: Rgb565, scale: f64)
        -> Result<(), DisplayError>;

    /// Draw an integer right-aligned in a field of `digits` characters
    fn draw_number(&mut self, x: i32, y: i32, value: i32, digits: u8) -> Result<(), DisplayError>;
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn clear_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        (**self).clear_screen(color)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        (**self).set_pixel(x, y, color)
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        (**self).draw_string(x, y, text)
    }

    fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        (**self).draw_rectangle(x0, y0, x1, y1, color)
    }

    fn draw_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        (**self).draw_circle(x, y, radius, color)
    }

    fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        (**self).draw_triangle(x0, y0, x1, y1, x2, y2, color)
    }

    fn draw_x_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        (**self).draw_x_axis(x, y, color)
    }

    fn draw_y_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        (**self).draw_y_axis(x, y, color)
    }

    fn draw_wave(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: f64,
    ) -> Result<(), DisplayError> {
        (**self).draw_wave(x, y, color, scale)
    }

    fn draw_number(&mut self, x: i32, y: i32, value: i32, digits: u8) -> Result<(), DisplayError> {
        (**self).draw_number(x, y, value, digits)
    }
}
