// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pan/tilt turret: a ULN2003 stepper pans, an SG90 servo tilts.
//!
//! The turret executes decoded protocol [`Command`]s and can steer itself toward a tracked box
//! reported by the vision host.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut turret = Turret::new(pan, tilt, delay);
//!
//! loop {
//!     if let Some(cmd) = parser.push(usart.read_byte()?) {
//!         turret.apply(&mut gpio, cmd)?;
//!     }
//! }
//! ```

use embedded_hal::{delay::DelayNs, pwm::SetDutyCycle};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::drivers::uln2003::{Direction, MoveConfig, SpeedMode, StepSequencer};
use crate::drivers::Sg90;
use crate::gpio::GpioBus;
use crate::protocol::Command;
use crate::tracking::TrackBox;

/// Horizontal field of view of the camera (degrees).
pub const DEFAULT_FOV_DEG: f32 = 60.0;
/// Fraction of the frame around the center where no correction is made.
pub const DEFAULT_DEAD_BAND: f32 = 0.05;
/// Servo pulse change per pixel of vertical error.
pub const DEFAULT_PULSE_PER_PIXEL: f32 = 2.0;

/// Error from either side of the turret.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurretError<G, P> {
    /// Stepper GPIO write failed.
    Gpio(G),
    /// Servo PWM update failed.
    Pwm(P),
}

/// Correction applied by [`Turret::aim`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aim {
    /// Pan angle requested, positive = forward. The stepper turns the nearest whole step count
    /// for this angle, so the shaft may land a fraction of a step away from it.
    pub pan_deg: f32,
    /// Servo pulse change, positive = right.
    pub tilt_us: i32,
}

pub struct Turret<P, PWM, D> {
    pan: StepSequencer<P>,
    tilt: Sg90<PWM>,
    delay: D,

    fov_deg: f32,
    dead_band: f32,
    pulse_per_pixel: f32,
    pan_speed: SpeedMode,
}

impl<P, PWM, D> Turret<P, PWM, D>
where
    P: Copy,
    PWM: SetDutyCycle,
    D: DelayNs,
{
    pub fn new(pan: StepSequencer<P>, tilt: Sg90<PWM>, delay: D) -> Self {
        Self {
            pan,
            tilt,
            delay,
            fov_deg: DEFAULT_FOV_DEG,
            dead_band: DEFAULT_DEAD_BAND,
            pulse_per_pixel: DEFAULT_PULSE_PER_PIXEL,
            pan_speed: SpeedMode::FullStep,
        }
    }

    /// Set the camera's horizontal field of view.
    pub fn with_fov_deg(mut self, fov_deg: f32) -> Self {
        self.fov_deg = fov_deg;
        self
    }

    /// Set the dead band as a fraction of the frame size.
    pub fn with_dead_band(mut self, fraction: f32) -> Self {
        self.dead_band = fraction;
        self
    }

    pub fn with_pulse_per_pixel(mut self, us: f32) -> Self {
        self.pulse_per_pixel = us;
        self
    }

    /// Drive cadence used when aiming.
    pub fn with_pan_speed(mut self, speed: SpeedMode) -> Self {
        self.pan_speed = speed;
        self
    }

    #[inline]
    pub fn pan(&self) -> &StepSequencer<P> {
        &self.pan
    }

    #[inline]
    pub fn tilt(&self) -> &Sg90<PWM> {
        &self.tilt
    }

    /// Execute one decoded command.
    pub fn apply<G>(
        &mut self,
        gpio: &mut G,
        cmd: Command,
    ) -> Result<(), TurretError<G::Error, PWM::Error>>
    where
        G: GpioBus<Pin = P>,
    {
        match cmd {
            Command::StepperSteps { config, steps } => self
                .pan
                .move_steps(gpio, &mut self.delay, steps as i32, config)
                .map_err(TurretError::Gpio),
            Command::StepperAngle { config, degrees } => self
                .pan
                .move_angle(gpio, &mut self.delay, degrees as f32, config)
                .map_err(TurretError::Gpio),
            Command::StepperRelease => self.pan.de_energize(gpio).map_err(TurretError::Gpio),
            Command::ServoPosition { pulse_us } => self
                .tilt
                .move_to_position(pulse_us)
                .map_err(TurretError::Pwm),
            Command::ServoLeft { distance } => {
                self.tilt.move_left(distance).map_err(TurretError::Pwm)
            }
            Command::ServoRight { distance } => {
                self.tilt.move_right(distance).map_err(TurretError::Pwm)
            }
            Command::ServoDefault => self.tilt.move_to_default().map_err(TurretError::Pwm),
            Command::ServoOff => self.tilt.turn_off().map_err(TurretError::Pwm),
        }
    }

    /// Steer toward `target` in a `frame_width` x `frame_height` image.
    ///
    /// A box right of center pans forward, a box below center moves the servo right. Offsets
    /// inside the dead band are ignored. A frame without a positive width and height moves
    /// nothing.
    pub fn aim<G>(
        &mut self,
        gpio: &mut G,
        target: &TrackBox,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<Aim, TurretError<G::Error, PWM::Error>>
    where
        G: GpioBus<Pin = P>,
    {
        if !(frame_width > 0.0 && frame_height > 0.0) {
            return Ok(Aim::default());
        }

        let (cx, cy) = target.center();
        let dx = cx - frame_width / 2.0;
        let dy = cy - frame_height / 2.0;
        let mut aim = Aim::default();

        if dx.abs() > self.dead_band * frame_width {
            let direction = if dx > 0.0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            let degrees = dx.abs() / frame_width * self.fov_deg;
            let cfg = MoveConfig::new(direction, self.pan_speed);
            self.pan
                .move_angle(gpio, &mut self.delay, degrees, cfg)
                .map_err(TurretError::Gpio)?;
            aim.pan_deg = degrees * direction.sign() as f32;
        }

        if dy.abs() > self.dead_band * frame_height {
            let before = self.tilt.position_us() as i32;
            let distance = (dy.abs() * self.pulse_per_pixel).round() as u16;
            if dy > 0.0 {
                self.tilt.move_right(distance).map_err(TurretError::Pwm)?;
            } else {
                self.tilt.move_left(distance).map_err(TurretError::Pwm)?;
            }
            aim.tilt_us = self.tilt.position_us() as i32 - before;
        }

        Ok(aim)
    }

    pub fn free(self) -> (StepSequencer<P>, Sg90<PWM>, D) {
        (self.pan, self.tilt, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sg90::{DEFAULT_POSITION_US, MAX_POSITION_US, PERIOD_US};
    use core::convert::Infallible;

    #[derive(Default)]
    struct Bus {
        writes: usize,
        down: bool,
    }

    impl GpioBus for Bus {
        type Pin = u8;
        type Error = &'static str;

        fn write_pin(&mut self, _pin: u8, _level: bool) -> Result<(), &'static str> {
            if self.down {
                return Err("bus down");
            }
            self.writes += 1;
            Ok(())
        }
    }

    struct Pwm(u16);

    impl embedded_hal::pwm::ErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            PERIOD_US
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.0 = duty;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn turret() -> Turret<u8, Pwm, NoDelay> {
        let pan = StepSequencer::new([12, 16, 20, 21]);
        let tilt = Sg90::new(Pwm(0)).unwrap();
        Turret::new(pan, tilt, NoDelay)
    }

    #[test]
    fn stepper_commands_move_the_pan_axis() {
        let mut t = turret();
        let mut bus = Bus::default();

        t.apply(
            &mut bus,
            Command::StepperSteps {
                config: MoveConfig::forward(SpeedMode::HalfStep),
                steps: 8,
            },
        )
        .unwrap();
        assert_eq!(t.pan().phase_index(), 8);
        assert_eq!(bus.writes, 32);

        t.apply(
            &mut bus,
            Command::StepperAngle {
                config: MoveConfig::backward(SpeedMode::FullStep),
                degrees: 360,
            },
        )
        .unwrap();
        assert_eq!(t.pan().phase_index(), 8 - 2 * 2038);

        t.apply(&mut bus, Command::StepperRelease).unwrap();
        assert_eq!(bus.writes, 32 + 4 * 2038 + 4);
    }

    #[test]
    fn servo_commands_move_the_tilt_axis() {
        let mut t = turret();
        let mut bus = Bus::default();

        t.apply(&mut bus, Command::ServoPosition { pulse_us: 1500 })
            .unwrap();
        t.apply(&mut bus, Command::ServoRight { distance: 2000 })
            .unwrap();
        assert_eq!(t.tilt().position_us(), MAX_POSITION_US);

        t.apply(&mut bus, Command::ServoOff).unwrap();
        t.apply(&mut bus, Command::ServoDefault).unwrap();
        assert_eq!(t.tilt().position_us(), DEFAULT_POSITION_US);
        assert_eq!(bus.writes, 0);
    }

    #[test]
    fn gpio_failure_is_reported() {
        let mut t = turret();
        let mut bus = Bus {
            down: true,
            ..Default::default()
        };

        let res = t.apply(&mut bus, Command::StepperRelease);
        assert_eq!(res, Err(TurretError::Gpio("bus down")));
    }

    #[test]
    fn centered_target_needs_no_correction() {
        let mut t = turret();
        let mut bus = Bus::default();

        let aim = t
            .aim(&mut bus, &TrackBox::around(322.0, 238.0), 640.0, 480.0)
            .unwrap();

        assert_eq!(aim, Aim::default());
        assert_eq!(bus.writes, 0);
    }

    #[test]
    fn target_right_and_below_pans_forward_and_tilts_right() {
        let mut t = turret();
        let mut bus = Bus::default();

        // 160 px right of center = a quarter of the frame = 15 degrees.
        let aim = t
            .aim(&mut bus, &TrackBox::around(480.0, 290.0), 640.0, 480.0)
            .unwrap();

        assert_eq!(aim.pan_deg, 15.0);
        assert_eq!(aim.tilt_us, 100);
        assert_eq!(t.pan().direction(), Direction::Forward);
        // round(2038 * 15 / 360) = 85 full steps
        assert_eq!(t.pan().phase_index(), 170);
        assert_eq!(t.tilt().position_us(), DEFAULT_POSITION_US + 100);
    }

    #[test]
    fn target_left_and_above_pans_backward_and_tilts_left() {
        let mut t = turret()
            .with_fov_deg(90.0)
            .with_pan_speed(SpeedMode::HalfStep)
            .with_pulse_per_pixel(5.0);
        let mut bus = Bus::default();

        let aim = t
            .aim(&mut bus, &TrackBox::around(160.0, 40.0), 640.0, 480.0)
            .unwrap();

        assert_eq!(aim.pan_deg, -22.5);
        assert_eq!(t.pan().direction(), Direction::Backward);
        // round(4076 * 22.5 / 360) = 255 half steps
        assert_eq!(t.pan().phase_index(), -255);
        // 200 px above center at 5 us/px, limited by the left stop
        assert_eq!(aim.tilt_us, 500 - DEFAULT_POSITION_US as i32);
    }

    #[test]
    fn empty_or_negative_frame_moves_nothing() {
        let mut t = turret();
        let mut bus = Bus::default();
        let target = TrackBox::around(480.0, 290.0);

        for (w, h) in [(0.0, 480.0), (640.0, 0.0), (-640.0, 480.0), (f32::NAN, 480.0)] {
            let aim = t.aim(&mut bus, &target, w, h).unwrap();
            assert_eq!(aim, Aim::default(), "frame {} x {}", w, h);
        }

        assert_eq!(bus.writes, 0);
        assert_eq!(t.pan().phase_index(), 0);
        assert_eq!(t.tilt().position_us(), DEFAULT_POSITION_US);
    }
}
