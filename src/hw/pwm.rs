// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Adapter from a HAL timer PWM channel to `embedded-hal` 1.0 [`SetDutyCycle`].

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::prelude::*;

/// Enabled PWM channel driving a servo signal line.
///
/// The timer must already run at the servo frame rate (50 Hz).
pub struct ServoPwm<CH> {
    channel: CH,
}

impl<CH: _embedded_hal_PwmPin<Duty = u16>> ServoPwm<CH> {
    /// Enable the channel with a zero duty cycle (no pulses).
    pub fn new(mut channel: CH) -> Self {
        channel.set_duty(0);
        channel.enable();
        Self { channel }
    }

    pub fn free(mut self) -> CH {
        self.channel.disable();
        self.channel
    }
}

impl<CH> ErrorType for ServoPwm<CH> {
    type Error = Infallible;
}

impl<CH: _embedded_hal_PwmPin<Duty = u16>> SetDutyCycle for ServoPwm<CH> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.channel.get_max_duty()
    }

    #[inline]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.channel.set_duty(duty);
        Ok(())
    }
}
