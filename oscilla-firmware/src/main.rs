//! Oscilla Firmware
//!
//! Firmware for a Nucleo-32 (STM32L432KC) driving an ILI9341 TFT.
//! Shows a splash screen, draws the embedded logo, then runs the
//! button-driven waveform scope forever.

#![no_std]
#![no_main]

mod board;
mod ili9341;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::ili9341::Ili9341;
use oscilla_core::bmp::Bitmap;
use oscilla_core::config::{parse_config, LogoConfig, ScopeConfig, ScopeLayout};
use oscilla_core::scope::ScaleController;
use oscilla_display::{DisplayError, GraphicsSink, RenderSink, Rgb565};
use oscilla_hal::Pull;

/// Scope configuration, checked by build.rs
static SCOPE_TOML: &str = include_str!("../scope.toml");

/// 24-bit uncompressed BMP drawn after the splash screen
static LOGO: &[u8] = include_bytes!("../assets/logo.bmp");

/// How long each splash screen stays up
const SPLASH_HOLD: Duration = Duration::from_secs(1);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Oscilla firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let config = match parse_config(SCOPE_TOML) {
        Ok(config) => config,
        Err(e) => {
            warn!("scope.toml rejected ({:?}), using defaults", e);
            ScopeConfig::default()
        }
    };

    // TFT on SPI1 (PA5=SCK, PA7=MOSI, PA6=MISO), PB5=CS, PB4=DC
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(board::TFT_SPI_HZ);
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);
    let cs = Output::new(p.PB5, Level::High, Speed::VeryHigh);
    let dc = Output::new(p.PB4, Level::Low, Speed::VeryHigh);

    info!("init tft");
    let mut panel = Ili9341::new(spi, cs, dc);
    if let Err(e) = panel.init(&mut Delay) {
        error!("Failed to initialize TFT: {:?}", e);
    }

    let mut sink = GraphicsSink::new(panel);
    if let Err(e) = sink.init() {
        error!("Failed to initialize render sink: {:?}", e);
    }

    if let Err(e) = splash(&mut sink, &config.layout).await {
        error!("Splash screen failed: {:?}", e);
    }

    // Buttons short to ground (PA4=A3 scale up, PA3=A2 scale down)
    let increase = board::button(p.PA4, Pull::Up);
    let decrease = board::button(p.PA3, Pull::Up);

    if config.logo.enabled {
        draw_logo(&mut sink, &config.logo);
    }

    let mut controller = ScaleController::from_config(increase, decrease, &config);
    info!(
        "Scope ready: scale {}, {} us/div",
        controller.scale(),
        controller.interval_micros()
    );

    loop {
        match controller.poll(&mut sink) {
            Ok(outcome) if outcome.is_idle() => {}
            Ok(outcome) => {
                info!(
                    "scale {} ({} us/div), {} redraw(s)",
                    controller.scale(),
                    controller.interval_micros(),
                    outcome.redraws()
                );
            }
            Err(e) => {
                error!("Scope redraw failed: {:?}", e);
            }
        }
    }
}

/// Greeting screen, then a bare scope at scale 1
async fn splash<S: RenderSink>(sink: &mut S, layout: &ScopeLayout) -> Result<(), DisplayError> {
    sink.clear_screen(Rgb565::BLACK)?;

    sink.draw_string(0, 32, "Oscilla TFT scope")?;
    sink.draw_string(12, 48, "Welcome")?;
    sink.draw_string(88, 64, "STM32L432 ILI9341")?;

    sink.draw_rectangle(20, 85, 40, 105, Rgb565::GREEN)?;
    sink.draw_circle(60, 95, 10, Rgb565::BLUE)?;
    sink.draw_triangle(90, 85, 80, 105, 100, 105, Rgb565::RED)?;

    Timer::after(SPLASH_HOLD).await;
    sink.clear_screen(layout.background)?;

    sink.draw_x_axis(layout.x_axis.x, layout.x_axis.y, layout.axis_color)?;
    sink.draw_y_axis(layout.y_axis.x, layout.y_axis.y, layout.axis_color)?;
    sink.draw_wave(layout.wave.x, layout.wave.y, layout.wave_color, 1.0)?;
    Timer::after(SPLASH_HOLD).await;

    sink.draw_string(30, 200, "finished")
}

/// Draw the embedded logo at every configured position
///
/// A malformed image is logged and skipped.
fn draw_logo<S: RenderSink>(sink: &mut S, logo: &LogoConfig) {
    info!("reading bmp header");

    let bitmap = match Bitmap::from_bytes(LOGO) {
        Ok(bitmap) => bitmap
            .with_alignment(logo.alignment)
            .with_column_offset(logo.offset_x),
        Err(e) => {
            error!("bad bmp: {:?}", e);
            return;
        }
    };

    let header = bitmap.header();
    info!("Image size:   {}", header.file_size);
    info!("Image offset: {}", header.pixel_data_offset);
    info!("Header size:  {}", header.header_size);
    info!("Image width:  {}", header.width);
    info!("Image height: {}", header.height);
    info!("Bit depth:    {}", header.bits_per_pixel);

    for position in &logo.positions {
        match bitmap.draw(position.x, position.y, sink) {
            Ok(pixels) => debug!("logo at ({}, {}): {} pixels", position.x, position.y, pixels),
            Err(e) => {
                error!("logo at ({}, {}) failed: {:?}", position.x, position.y, e);
                return;
            }
        }
    }
}
