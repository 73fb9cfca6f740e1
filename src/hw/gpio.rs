// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! [`GpioBus`] over type-erased STM32 push-pull outputs.
//!
//! Pins of different ports and numbers are erased to a single type so that one port object can
//! serve every GPIO-driven device on the board. Pin identifiers are indices into the port.

use core::convert::Infallible;

use stm32f7xx_hal::gpio::{ErasedPin, Output, PinState, PushPull};

use crate::gpio::{GpioBus, PinBankError};

pub struct GpioPort<const N: usize> {
    pins: [ErasedPin<Output<PushPull>>; N],
}

impl<const N: usize> GpioPort<N> {
    /// Take the pins and drive them all low.
    pub fn new(mut pins: [ErasedPin<Output<PushPull>>; N]) -> Self {
        for pin in pins.iter_mut() {
            pin.set_low();
        }
        Self { pins }
    }

    pub fn free(self) -> [ErasedPin<Output<PushPull>>; N] {
        self.pins
    }
}

impl<const N: usize> GpioBus for GpioPort<N> {
    type Pin = usize;
    type Error = PinBankError<Infallible>;

    #[inline]
    fn write_pin(&mut self, pin: usize, level: bool) -> Result<(), Self::Error> {
        let out = self
            .pins
            .get_mut(pin)
            .ok_or(PinBankError::UnknownPin(pin))?;
        out.set_state(if level { PinState::High } else { PinState::Low });
        Ok(())
    }
}
