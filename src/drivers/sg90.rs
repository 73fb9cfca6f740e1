// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TowerPro SG90 micro servo on a 50 Hz PWM channel.
//!
//! Position is expressed as a pulse width in microseconds within a 20 ms frame. Pulses are
//! clamped to the mechanical range of the SG90 (500 µs to 2500 µs).

use embedded_hal::pwm::SetDutyCycle;

/// Centered position used at start-up.
pub const DEFAULT_POSITION_US: u16 = 1170;
/// Leftmost pulse width.
pub const MIN_POSITION_US: u16 = 500;
/// Rightmost pulse width.
pub const MAX_POSITION_US: u16 = 2500;
/// PWM frame length (50 Hz).
pub const PERIOD_US: u16 = 20_000;

/// Servo driver owning its PWM channel.
pub struct Sg90<PWM> {
    pwm: PWM,
    position_us: u16,
}

impl<PWM: SetDutyCycle> Sg90<PWM> {
    /// Take ownership of the channel and move to [`DEFAULT_POSITION_US`].
    pub fn new(pwm: PWM) -> Result<Self, PWM::Error> {
        let mut servo = Self {
            pwm,
            position_us: DEFAULT_POSITION_US,
        };
        servo.move_to_position(DEFAULT_POSITION_US)?;
        Ok(servo)
    }

    /// Last commanded pulse width, kept across `turn_off`.
    #[inline]
    pub fn position_us(&self) -> u16 {
        self.position_us
    }

    /// Drive the servo to `pulse_us`, clamped to the SG90 range.
    pub fn move_to_position(&mut self, pulse_us: u16) -> Result<(), PWM::Error> {
        let pulse_us = pulse_us.clamp(MIN_POSITION_US, MAX_POSITION_US);
        self.pwm.set_duty_cycle_fraction(pulse_us, PERIOD_US)?;
        self.position_us = pulse_us;
        Ok(())
    }

    #[inline]
    pub fn move_to_default(&mut self) -> Result<(), PWM::Error> {
        self.move_to_position(DEFAULT_POSITION_US)
    }

    /// Move left by `distance` µs, stopping at [`MIN_POSITION_US`].
    pub fn move_left(&mut self, distance: u16) -> Result<(), PWM::Error> {
        let target = self
            .position_us
            .saturating_sub(distance)
            .max(MIN_POSITION_US);
        self.move_to_position(target)
    }

    /// Move right by `distance` µs, stopping at [`MAX_POSITION_US`].
    pub fn move_right(&mut self, distance: u16) -> Result<(), PWM::Error> {
        let target = self
            .position_us
            .saturating_add(distance)
            .min(MAX_POSITION_US);
        self.move_to_position(target)
    }

    /// Stop sending pulses. The servo goes limp until the next move.
    pub fn turn_off(&mut self) -> Result<(), PWM::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }

    pub fn free(self) -> PWM {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// PWM channel with 1 µs resolution over a 20 ms frame.
    #[derive(Default)]
    struct RecordingPwm {
        duties: Vec<u16>,
    }

    impl ErrorType for RecordingPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for RecordingPwm {
        fn max_duty_cycle(&self) -> u16 {
            PERIOD_US
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duties.push(duty);
            Ok(())
        }
    }

    fn servo() -> Sg90<RecordingPwm> {
        Sg90::new(RecordingPwm::default()).unwrap()
    }

    #[test]
    fn starts_at_default_position() {
        let servo = servo();
        assert_eq!(servo.position_us(), DEFAULT_POSITION_US);
        assert_eq!(servo.free().duties, vec![1170]);
    }

    #[test]
    fn absolute_moves_are_clamped() {
        let mut servo = servo();

        servo.move_to_position(2000).unwrap();
        assert_eq!(servo.position_us(), 2000);

        servo.move_to_position(100).unwrap();
        assert_eq!(servo.position_us(), MIN_POSITION_US);

        servo.move_to_position(3000).unwrap();
        assert_eq!(servo.position_us(), MAX_POSITION_US);

        assert_eq!(servo.free().duties, vec![1170, 2000, 500, 2500]);
    }

    #[test]
    fn relative_moves_stop_at_the_limits() {
        let mut servo = servo();

        servo.move_left(300).unwrap();
        assert_eq!(servo.position_us(), 870);
        servo.move_left(1000).unwrap();
        assert_eq!(servo.position_us(), MIN_POSITION_US);

        servo.move_right(1500).unwrap();
        assert_eq!(servo.position_us(), 2000);
        servo.move_right(u16::MAX).unwrap();
        assert_eq!(servo.position_us(), MAX_POSITION_US);
    }

    #[test]
    fn zero_distance_rewrites_current_position() {
        let mut servo = servo();
        servo.move_left(0).unwrap();
        servo.move_right(0).unwrap();
        assert_eq!(servo.free().duties, vec![1170, 1170, 1170]);
    }

    #[test]
    fn turn_off_sends_zero_and_remembers_position() {
        let mut servo = servo();
        servo.move_to_position(1800).unwrap();
        servo.turn_off().unwrap();

        assert_eq!(servo.position_us(), 1800);

        servo.move_to_default().unwrap();
        assert_eq!(servo.free().duties, vec![1170, 1800, 0, 1170]);
    }
}
