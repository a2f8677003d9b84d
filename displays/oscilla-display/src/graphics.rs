//! `embedded-graphics` backed render sink
//!
//! Implements the TFT primitives on top of any draw target with an RGB565
//! color type, so a panel driver only has to provide `DrawTarget`.

use core::f32::consts::PI;
use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565 as PanelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::backend::{DisplayError, RenderSink};
use crate::color::Rgb565;

/// Distance between axis tick marks in pixels
pub const TICK_SPACING: i32 = 20;

/// Total length of an axis tick mark in pixels
pub const TICK_LENGTH: i32 = 4;

/// Peak deflection of the waveform from its baseline in pixels
pub const WAVE_AMPLITUDE: f32 = 40.0;

/// Waveform period in pixels at a time base scale of 1.0
pub const WAVE_PERIOD: f32 = 80.0;

/// Shortest period the waveform is drawn with
const MIN_WAVE_PERIOD: f32 = 2.0;

/// Widest number field `draw_number` renders (sign plus ten digits)
pub const MAX_NUMBER_WIDTH: usize = 11;

/// Render sink drawing through an `embedded-graphics` target
pub struct GraphicsSink<D> {
    target: D,
    foreground: Rgb565,
    background: Rgb565,
    ready: bool,
}

impl<D> GraphicsSink<D>
where
    D: DrawTarget<Color = PanelColor>,
{
    /// Wrap a draw target; text defaults to white on black
    pub fn new(target: D) -> Self {
        Self {
            target,
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
            ready: false,
        }
    }

    /// Set the colors used by `draw_string` and `draw_number`
    pub fn set_text_color(&mut self, foreground: Rgb565, background: Rgb565) {
        self.foreground = foreground;
        self.background = background;
    }

    /// Check if `init` has been called
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Borrow the wrapped draw target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutably borrow the wrapped draw target
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Release the wrapped draw target
    pub fn into_inner(self) -> D {
        self.target
    }

    /// Drawing is only allowed after `init`
    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.ready {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Right-most visible column
    fn right_edge(&self) -> i32 {
        let area = self.target.bounding_box();
        area.top_left.x + area.size.width as i32 - 1
    }

    /// Bottom-most visible row
    fn bottom_edge(&self) -> i32 {
        let area = self.target.bounding_box();
        area.top_left.y + area.size.height as i32 - 1
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), DisplayError> {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(panel_color(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn text_style(&self) -> MonoTextStyle<'static, PanelColor> {
        MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(panel_color(self.foreground))
            .background_color(panel_color(self.background))
            .build()
    }
}

impl<D> RenderSink for GraphicsSink<D>
where
    D: DrawTarget<Color = PanelColor>,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        self.ready = true;
        Ok(())
    }

    fn clear_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.target
            .clear(panel_color(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        Pixel(Point::new(x, y), panel_color(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let style = self.text_style();
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(panel_color(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        Circle::with_center(Point::new(x, y), radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(panel_color(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
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
        self.ensure_ready()?;
        Triangle::new(Point::new(x0, y0), Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(PrimitiveStyle::with_stroke(panel_color(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_x_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let right = self.right_edge();
        self.line(Point::new(x, y), Point::new(right, y), color)?;

        let half = TICK_LENGTH / 2;
        let mut tick = x + TICK_SPACING;
        while tick <= right {
            self.line(Point::new(tick, y - half), Point::new(tick, y + half), color)?;
            tick += TICK_SPACING;
        }
        Ok(())
    }

    fn draw_y_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let bottom = self.bottom_edge();
        self.line(Point::new(x, y), Point::new(x, bottom), color)?;

        let half = TICK_LENGTH / 2;
        let mut tick = y + TICK_SPACING;
        while tick <= bottom {
            self.line(Point::new(x - half, tick), Point::new(x + half, tick), color)?;
            tick += TICK_SPACING;
        }
        Ok(())
    }

    fn draw_wave(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: f64,
    ) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let right = self.right_edge();
        // NaN and infinite scales fall back to the shortest period
        let period = (WAVE_PERIOD / scale as f32).max(MIN_WAVE_PERIOD);

        let mut previous = Point::new(x, y);
        self.set_pixel(x, y, color)?;
        for column in (x + 1)..=right {
            let phase = 2.0 * PI * (column - x) as f32 / period;
            let deflection = (phase.sin() * WAVE_AMPLITUDE) as i32;
            let point = Point::new(column, y - deflection);
            self.line(previous, point, color)?;
            previous = point;
        }
        Ok(())
    }

    fn draw_number(&mut self, x: i32, y: i32, value: i32, digits: u8) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let field = format_number(value, digits);
        self.draw_string(x, y, &field)
    }
}

/// Convert to the `embedded-graphics` color type
pub fn panel_color(color: Rgb565) -> PanelColor {
    PanelColor::from(RawU16::new(color.raw()))
}

/// Format `value` right-aligned in a field of `digits` characters
///
/// Values wider than the field keep their least significant characters,
/// matching how the panel library clips numbers.
pub fn format_number(value: i32, digits: u8) -> String<MAX_NUMBER_WIDTH> {
    let mut full: String<MAX_NUMBER_WIDTH> = String::new();
    let _ = write!(full, "{}", value);

    let width = (digits as usize).min(MAX_NUMBER_WIDTH);
    let mut field: String<MAX_NUMBER_WIDTH> = String::new();
    if full.len() >= width {
        let _ = field.push_str(&full[full.len() - width..]);
    } else {
        for _ in 0..width - full.len() {
            let _ = field.push(' ');
        }
        let _ = field.push_str(&full);
    }
    field
}
