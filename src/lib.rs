// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Okon Turret Firmware
//!
//! This crate contains the firmware components for the Okon ball-tracking turret: a 28BYJ-48
//! stepper (ULN2003 driver) pans the camera and an SG90 servo tilts it, steered by a vision host
//! over a serial command protocol. The library targets an STM32F767 MCU but the device logic is
//! written against `embedded-hal` traits and runs on the host as well.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`gpio`] | Pin-writer seam shared by GPIO-driven devices |
//! | [`drivers`] | Device-level drivers (ULN2003 stepper, SG90 servo) |
//! | [`control`] | Pan/tilt turret built from the drivers |
//! | [`protocol`] | Serial command framing |
//! | [`tracking`] | Geometry of the tracked box |
//! | `hw` | MCU-level wrappers around GPIO, USART, timers (firmware target only) |
//!
//! ## Getting Started
//!
//! Run the unit tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod drivers;
pub mod gpio;
pub mod protocol;
pub mod tracking;

#[cfg(target_os = "none")]
pub mod hw;
