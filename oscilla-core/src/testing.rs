//! Recording render sink for unit tests

use heapless::{String, Vec};
use oscilla_display::{DisplayError, RenderSink, Rgb565};

const MAX_CALLS: usize = 128;

/// One primitive call observed by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init,
    Clear(u16),
    Pixel(i32, i32, u16),
    Text(i32, i32, String<16>),
    Rectangle(i32, i32, i32, i32, u16),
    Circle(i32, i32, u32, u16),
    Triangle([i32; 6], u16),
    XAxis(i32, i32, u16),
    YAxis(i32, i32, u16),
    Wave(i32, i32, u16, f64),
    Number(i32, i32, i32, u8),
}

impl Call {
    pub fn text(x: i32, y: i32, text: &str) -> Self {
        let mut s = String::new();
        s.push_str(text).unwrap();
        Call::Text(x, y, s)
    }
}

/// Sink that records every call in order
pub struct RecordingSink {
    calls: Vec<Call, MAX_CALLS>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail: false,
        }
    }

    /// Sink whose every call fails with a communication error
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_log(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: Call) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.calls.push(call).map_err(|_| DisplayError::Communication)
    }
}

impl RenderSink for RecordingSink {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.record(Call::Init)
    }

    fn clear_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.record(Call::Clear(color.raw()))
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.record(Call::Pixel(x, y, color.raw()))
    }

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        let mut s = String::new();
        s.push_str(text).map_err(|_| DisplayError::Communication)?;
        self.record(Call::Text(x, y, s))
    }

    fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.record(Call::Rectangle(x0, y0, x1, y1, color.raw()))
    }

    fn draw_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.record(Call::Circle(x, y, radius, color.raw()))
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
        self.record(Call::Triangle([x0, y0, x1, y1, x2, y2], color.raw()))
    }

    fn draw_x_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.record(Call::XAxis(x, y, color.raw()))
    }

    fn draw_y_axis(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.record(Call::YAxis(x, y, color.raw()))
    }

    fn draw_wave(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: f64,
    ) -> Result<(), DisplayError> {
        self.record(Call::Wave(x, y, color.raw(), scale))
    }

    fn draw_number(&mut self, x: i32, y: i32, value: i32, digits: u8) -> Result<(), DisplayError> {
        self.record(Call::Number(x, y, value, digits))
    }
}
