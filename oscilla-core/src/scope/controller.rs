//! Scale controller
//!
//! Busy-polls the increase and decrease buttons once per iteration, in that
//! order. A press changes the scale and redraws the whole scope before the
//! next sample is taken. In [`TriggerMode::Level`] a held button fires on
//! every iteration.

use core::convert::Infallible;

use oscilla_display::{DisplayError, RenderSink};
use oscilla_hal::PushButton;

use super::state::{ScaleEvent, WaveState};
use crate::config::{ScaleConfig, ScopeConfig, ScopeLayout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How button samples become transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerMode {
    /// Fire on every iteration the button is held
    #[default]
    Level,
    /// Fire once per press, on the released-to-pressed transition
    Edge,
}

/// Transitions fired by one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    pub scaled_up: bool,
    pub scaled_down: bool,
}

impl PollOutcome {
    /// Number of full redraws issued
    pub fn redraws(&self) -> u8 {
        self.scaled_up as u8 + self.scaled_down as u8
    }

    /// Check if nothing fired
    pub fn is_idle(&self) -> bool {
        !self.scaled_up && !self.scaled_down
    }
}

/// Per-button trigger state
#[derive(Debug, Clone, Copy)]
struct Trigger {
    mode: TriggerMode,
    held: bool,
}

impl Trigger {
    const fn new(mode: TriggerMode) -> Self {
        Self { mode, held: false }
    }

    fn sample(&mut self, pressed: bool) -> bool {
        let fire = match self.mode {
            TriggerMode::Level => pressed,
            TriggerMode::Edge => pressed && !self.held,
        };
        self.held = pressed;
        fire
    }
}

/// Owns the time base and redraws the scope when a button is pressed
pub struct ScaleController<U, D> {
    increase: U,
    decrease: D,
    state: WaveState,
    factor: f64,
    layout: ScopeLayout,
    increase_trigger: Trigger,
    decrease_trigger: Trigger,
}

impl<U: PushButton, D: PushButton> ScaleController<U, D> {
    /// Controller with the stock layout, scale 1.0 and a factor of 2
    pub fn new(increase: U, decrease: D) -> Self {
        Self::from_config(increase, decrease, &ScopeConfig::default())
    }

    /// Controller configured from `config`
    ///
    /// An initial scale or step factor that is not finite and strictly
    /// positive falls back to its default (1.0 and 2.0).
    pub fn from_config(increase: U, decrease: D, config: &ScopeConfig) -> Self {
        let trigger = config.scale.trigger;
        let factor = config.scale.factor;
        Self {
            increase,
            decrease,
            state: WaveState::with_scale(config.scale.initial).unwrap_or_default(),
            factor: if factor.is_finite() && factor > 0.0 {
                factor
            } else {
                ScaleConfig::default().factor
            },
            layout: config.layout.clone(),
            increase_trigger: Trigger::new(trigger),
            decrease_trigger: Trigger::new(trigger),
        }
    }

    /// Current time base
    pub fn state(&self) -> WaveState {
        self.state
    }

    /// Current scale factor
    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    /// Microseconds per division at the current scale
    pub fn interval_micros(&self) -> f64 {
        self.state.interval_micros()
    }

    /// Layout used for redraws
    pub fn layout(&self) -> &ScopeLayout {
        &self.layout
    }

    /// Redraw the scope at the current scale
    pub fn redraw<S: RenderSink>(&self, sink: &mut S) -> Result<(), DisplayError> {
        draw_scope(sink, &self.layout, &self.state)
    }

    /// Apply one transition and redraw
    pub fn apply<S: RenderSink>(
        &mut self,
        event: ScaleEvent,
        sink: &mut S,
    ) -> Result<(), DisplayError> {
        self.state.apply(event, self.factor);
        self.redraw(sink)
    }

    /// Sample both buttons once and handle any presses
    ///
    /// Both buttons are sampled before either transition is applied, so a
    /// failed redraw never leaves a trigger a sample behind.
    pub fn poll<S: RenderSink>(&mut self, sink: &mut S) -> Result<PollOutcome, DisplayError> {
        let outcome = PollOutcome {
            scaled_up: self.increase_trigger.sample(self.increase.pressed()),
            scaled_down: self.decrease_trigger.sample(self.decrease.pressed()),
        };

        if outcome.scaled_up {
            self.apply(ScaleEvent::Up, sink)?;
        }
        if outcome.scaled_down {
            self.apply(ScaleEvent::Down, sink)?;
        }

        Ok(outcome)
    }

    /// Poll forever
    ///
    /// Only returns if the sink fails.
    pub fn run<S: RenderSink>(&mut self, sink: &mut S) -> Result<Infallible, DisplayError> {
        loop {
            self.poll(sink)?;
        }
    }
}

/// Readout value for the current state, truncated toward zero
pub fn readout_value(state: &WaveState) -> i32 {
    state.interval_micros() as i32
}

/// Full scope redraw
///
/// Clears the screen, then draws the X axis, Y axis, waveform, unit label
/// and interval readout, in that order.
pub fn draw_scope<S: RenderSink>(
    sink: &mut S,
    layout: &ScopeLayout,
    state: &WaveState,
) -> Result<(), DisplayError> {
    sink.clear_screen(layout.background)?;
    sink.draw_x_axis(layout.x_axis.x, layout.x_axis.y, layout.axis_color)?;
    sink.draw_y_axis(layout.y_axis.x, layout.y_axis.y, layout.axis_color)?;
    sink.draw_wave(layout.wave.x, layout.wave.y, layout.wave_color, state.scale())?;
    sink.draw_string(layout.label_at.x, layout.label_at.y, &layout.label)?;
    sink.draw_number(
        layout.readout_at.x,
        layout.readout_at.y,
        readout_value(state),
        layout.readout_digits,
    )
}
