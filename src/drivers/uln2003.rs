// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step sequencer for a 28BYJ-48 unipolar stepper behind a ULN2003 darlington array.
//!
//! The four driver inputs (IN1..IN4) are walked through an 8-row half-step table. Full-step mode
//! reuses the same table and skips every other row, so both modes share one phase counter and
//! switching between them never loses the rotor position.
//!
//! Revolution counts for the geared 28BYJ-48:
//! - half-step: 4076 steps per output shaft revolution
//! - full-step: 2038 steps per output shaft revolution
//!
//! The GPIO bus and delay are passed in as `&mut` to each move so that several motors can share
//! the same controller.

use embedded_hal::delay::DelayNs;

use crate::gpio::GpioBus;

/// Half-step coil energization table (IN1, IN2, IN3, IN4).
pub const PHASE_TABLE: [[bool; 4]; 8] = [
    [true, false, false, true],
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
];

const PHASES: i32 = PHASE_TABLE.len() as i32;

/// Default delay between two steps (1.5 ms).
pub const DEFAULT_STEP_DELAY_US: u32 = 1_500;

/// Rotation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Drive cadence. The discriminant is the phase advance per step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpeedMode {
    /// All 8 table rows, finer resolution.
    HalfStep = 1,
    /// Every other table row, twice the speed.
    FullStep = 2,
}

impl SpeedMode {
    #[inline]
    pub fn multiplier(self) -> i32 {
        self as i32
    }

    /// Steps for one output shaft revolution.
    pub fn revolution_steps(self) -> i32 {
        match self {
            SpeedMode::HalfStep => 4076,
            SpeedMode::FullStep => 2038,
        }
    }
}

/// Per-move options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveConfig {
    pub direction: Direction,
    pub speed: SpeedMode,
}

impl MoveConfig {
    pub fn new(direction: Direction, speed: SpeedMode) -> Self {
        Self { direction, speed }
    }

    pub fn forward(speed: SpeedMode) -> Self {
        Self::new(Direction::Forward, speed)
    }

    pub fn backward(speed: SpeedMode) -> Self {
        Self::new(Direction::Backward, speed)
    }
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self::new(Direction::Forward, SpeedMode::HalfStep)
    }
}

/// Number of steps needed to turn `angle_deg` in the given mode.
///
/// Rounded to the nearest step, halves away from zero. The sign of the angle is kept.
///
/// The product is formed in `f64` so that multi-turn angles still land on the exact step; an
/// `f32` product stops being exact above roughly 4116°. Results beyond `i32` saturate.
pub fn steps_for_angle(angle_deg: f32, speed: SpeedMode) -> i32 {
    let steps = f64::from(speed.revolution_steps()) * f64::from(angle_deg) / 360.0;
    // `as` truncates toward zero, so shifting by half first rounds half away from zero.
    if steps >= 0.0 {
        (steps + 0.5) as i32
    } else {
        (steps - 0.5) as i32
    }
}

/// Coil pattern of a table row. `row` is taken modulo 8.
#[inline]
pub fn pattern(row: usize) -> [bool; 4] {
    PHASE_TABLE[row % PHASE_TABLE.len()]
}

/// Phase sequencer for one ULN2003-driven stepper.
///
/// `P` is whatever pin identifier the GPIO bus understands.
pub struct StepSequencer<P> {
    pins: [P; 4],
    /// Continuous phase position, only reduced modulo 8 at lookup.
    phase_index: i32,
    direction: Direction,
    speed: SpeedMode,
    step_delay_us: u32,
}

impl<P: Copy> StepSequencer<P> {
    /// Create a sequencer for the IN1..IN4 lines, at phase 0, forward, half-step.
    pub fn new(pins: [P; 4]) -> Self {
        Self {
            pins,
            phase_index: 0,
            direction: Direction::Forward,
            speed: SpeedMode::HalfStep,
            step_delay_us: DEFAULT_STEP_DELAY_US,
        }
    }

    /// Override the inter-step delay.
    pub fn with_step_delay_us(mut self, us: u32) -> Self {
        self.step_delay_us = us;
        self
    }

    #[inline]
    pub fn pins(&self) -> &[P; 4] {
        &self.pins
    }

    /// Raw, unreduced phase counter.
    #[inline]
    pub fn phase_index(&self) -> i32 {
        self.phase_index
    }

    /// Current table row (0..8).
    #[inline]
    pub fn phase(&self) -> usize {
        self.phase_index.rem_euclid(PHASES) as usize
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> SpeedMode {
        self.speed
    }

    #[inline]
    pub fn step_delay_us(&self) -> u32 {
        self.step_delay_us
    }

    /// Steps for `angle_deg` in the given mode.
    #[inline]
    pub fn steps_for_angle(&self, angle_deg: f32, speed: SpeedMode) -> i32 {
        steps_for_angle(angle_deg, speed)
    }

    /// Perform `steps` physical steps. Zero and negative counts write nothing and keep the phase.
    ///
    /// The direction and speed of `cfg` are remembered. In full-step mode an odd phase is first
    /// bumped onto the next even row, so a forward/backward pair of equal full-step moves returns
    /// to the realigned phase rather than to an odd start.
    pub fn move_steps<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        steps: i32,
        cfg: MoveConfig,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        self.direction = cfg.direction;
        self.speed = cfg.speed;

        if steps > 0 && self.speed == SpeedMode::FullStep && self.phase() % 2 != 0 {
            self.phase_index = self.phase_index.wrapping_add(1);
        }

        let advance = self.direction.sign() * self.speed.multiplier();
        for _ in 0..steps.max(0) {
            self.write_phase(gpio)?;
            delay.delay_us(self.step_delay_us);
            self.phase_index = self.phase_index.wrapping_add(advance);
        }

        Ok(())
    }

    /// Turn by `angle_deg`. Only the magnitude of the angle is used; `cfg.direction` decides the
    /// way the shaft turns.
    pub fn move_angle<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        angle_deg: f32,
        cfg: MoveConfig,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        let steps = steps_for_angle(angle_deg, cfg.speed).saturating_abs();
        self.move_steps(gpio, delay, steps, cfg)
    }

    pub fn move_forward<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        steps: i32,
        speed: SpeedMode,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        self.move_steps(gpio, delay, steps, MoveConfig::forward(speed))
    }

    pub fn move_backward<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        steps: i32,
        speed: SpeedMode,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        self.move_steps(gpio, delay, steps, MoveConfig::backward(speed))
    }

    pub fn move_forward_for_angle<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        angle_deg: f32,
        speed: SpeedMode,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        self.move_angle(gpio, delay, angle_deg, MoveConfig::forward(speed))
    }

    pub fn move_backward_for_angle<G, D>(
        &mut self,
        gpio: &mut G,
        delay: &mut D,
        angle_deg: f32,
        speed: SpeedMode,
    ) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
        D: DelayNs,
    {
        self.move_angle(gpio, delay, angle_deg, MoveConfig::backward(speed))
    }

    /// Drive all coils low. The phase counter is kept, so the next move resumes on the same row.
    pub fn de_energize<G>(&mut self, gpio: &mut G) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
    {
        for &pin in self.pins.iter() {
            gpio.write_pin(pin, false)?;
        }
        Ok(())
    }

    fn write_phase<G>(&self, gpio: &mut G) -> Result<(), G::Error>
    where
        G: GpioBus<Pin = P>,
    {
        let levels = pattern(self.phase());
        for (&pin, &level) in self.pins.iter().zip(levels.iter()) {
            gpio.write_pin(pin, level)?;
        }
        Ok(())
    }
}
