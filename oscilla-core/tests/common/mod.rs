//! Shared recording sink for the integration tests

#![allow(dead_code)]

use oscilla_display::{DisplayError, RenderSink, Rgb565};

/// Counts every sink call, keeps pixels and readouts
#[derive(Default)]
pub struct CountingSink {
    pub calls: usize,
    pub pixels: Vec<(i32, i32, u16)>,
    pub readouts: Vec<i32>,
}

impl CountingSink {
    fn hit(&mut self) -> Result<(), DisplayError> {
        self.calls += 1;
        Ok(())
    }
}

impl RenderSink for CountingSink {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.hit()
    }

    fn clear_screen(&mut self, _color: Rgb565) -> Result<(), DisplayError> {
        self.hit()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), DisplayError> {
        self.pixels.push((x, y, color.raw()));
        self.hit()
    }

    fn draw_string(&mut self, _x: i32, _y: i32, _text: &str) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_rectangle(
        &mut self,
        _x0: i32,
        _y0: i32,
        _x1: i32,
        _y1: i32,
        _color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_circle(
        &mut self,
        _x: i32,
        _y: i32,
        _radius: u32,
        _color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_triangle(
        &mut self,
        _x0: i32,
        _y0: i32,
        _x1: i32,
        _y1: i32,
        _x2: i32,
        _y2: i32,
        _color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_x_axis(&mut self, _x: i32, _y: i32, _color: Rgb565) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_y_axis(&mut self, _x: i32, _y: i32, _color: Rgb565) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_wave(
        &mut self,
        _x: i32,
        _y: i32,
        _color: Rgb565,
        _scale: f64,
    ) -> Result<(), DisplayError> {
        self.hit()
    }

    fn draw_number(
        &mut self,
        _x: i32,
        _y: i32,
        value: i32,
        _digits: u8,
    ) -> Result<(), DisplayError> {
        self.readouts.push(value);
        self.hit()
    }
}
