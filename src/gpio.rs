// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin-writer abstraction shared by every GPIO-driven device.
//!
//! Drivers never own the GPIO controller. Each call receives the bus as `&mut`, so several
//! devices (e.g. two steppers) can be driven from one controller without shared global state.

use embedded_hal::digital::{OutputPin, PinState};

/// A controller that can set individual digital outputs by identifier.
pub trait GpioBus {
    /// Opaque pin identifier.
    type Pin: Copy;
    type Error;

    /// Drive `pin` high (`true`) or low (`false`). The level must be applied before returning.
    fn write_pin(&mut self, pin: Self::Pin, level: bool) -> Result<(), Self::Error>;
}

impl<B: GpioBus + ?Sized> GpioBus for &mut B {
    type Pin = B::Pin;
    type Error = B::Error;

    #[inline]
    fn write_pin(&mut self, pin: Self::Pin, level: bool) -> Result<(), Self::Error> {
        (**self).write_pin(pin, level)
    }
}

/// Errors from a [`PinBank`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinBankError<E> {
    /// Index outside the bank.
    UnknownPin(usize),
    /// The underlying output pin failed.
    Pin(E),
}

/// Fixed bank of `embedded-hal` output pins addressed by index.
///
/// Useful when the four coil lines are concrete HAL pins of the same type:
///
/// ```ignore
/// let mut bank = PinBank::new([in1, in2, in3, in4]);
/// let mut stepper = StepSequencer::new([0, 1, 2, 3]);
/// ```
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> PinBank<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Identifiers of every pin in the bank, in order.
    pub fn ids(&self) -> [usize; N] {
        core::array::from_fn(|i| i)
    }

    pub fn free(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> GpioBus for PinBank<P, N> {
    type Pin = usize;
    type Error = PinBankError<P::Error>;

    fn write_pin(&mut self, pin: usize, level: bool) -> Result<(), Self::Error> {
        let out = self
            .pins
            .get_mut(pin)
            .ok_or(PinBankError::UnknownPin(pin))?;
        out.set_state(PinState::from(level))
            .map_err(PinBankError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct FakePin {
        high: bool,
        writes: usize,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn writes_reach_the_indexed_pin() {
        let mut bank = PinBank::new([
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
        ]);

        bank.write_pin(1, true).unwrap();
        bank.write_pin(2, false).unwrap();

        let [a, b, c] = bank.free();
        assert_eq!((a.high, a.writes), (false, 0));
        assert_eq!((b.high, b.writes), (true, 1));
        assert_eq!((c.high, c.writes), (false, 1));
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut bank = PinBank::new([FakePin::default(), FakePin::default()]);
        assert_eq!(bank.write_pin(4, true), Err(PinBankError::UnknownPin(4)));
    }

    #[test]
    fn ids_cover_the_bank() {
        let bank = PinBank::new([
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
        ]);
        assert_eq!(bank.ids(), [0, 1, 2, 3]);
    }

    #[test]
    fn borrowed_bus_forwards_writes() {
        fn raise<B: GpioBus<Pin = usize>>(mut bus: B) -> Result<(), B::Error> {
            bus.write_pin(0, true)
        }

        let mut bank = PinBank::new([FakePin::default()]);
        raise(&mut bank).unwrap();
        assert!(bank.free()[0].high);
    }
}
