// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767 turret board.
//!
//! | Signal | Pin | Notes |
//! | ------ | --- | ----- |
//! | ULN2003 IN1..IN4 | PE2, PE3, PE4, PE5 | push-pull outputs |
//! | SG90 signal | PD12 | TIM4_CH1 (PWM) |
//! | USART1 TX/RX | PA9, PA10 | link to the vision host |
//! | Status LED | PB7 | active-high |

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, ErasedPin, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub stepper: StepperPins,
    pub servo: gpiod::PD12<Alternate<2>>,
    pub led: gpiob::PB7<Output<PushPull>>,
}

// USART1 TX/RX
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// ULN2003 inputs, in coil order. Erased so they fit one [`GpioPort`](super::GpioPort).
pub struct StepperPins {
    pub coils: [ErasedPin<Output<PushPull>>; 4],
}

impl BoardPins {
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            stepper: StepperPins {
                coils: [
                    gpioe.pe2.into_push_pull_output().erase(),
                    gpioe.pe3.into_push_pull_output().erase(),
                    gpioe.pe4.into_push_pull_output().erase(),
                    gpioe.pe5.into_push_pull_output().erase(),
                ],
            },

            servo: gpiod.pd12.into_alternate::<2>(),

            led: gpiob.pb7.into_push_pull_output(),
        }
    }
}
