// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU Glue
//!
//! Wrappers that adapt STM32F7 HAL peripherals to the seams the drivers are written against.
//! Only built for the firmware target.

pub mod delay;
pub mod gpio;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use delay::SysTickDelay;
pub use gpio::GpioPort;
pub use pins::BoardPins;
pub use pwm::ServoPwm;
pub use usart::Usart;
