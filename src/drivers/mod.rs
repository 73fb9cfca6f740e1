// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the GPIO/PWM seams and below the
//! turret logic.
//!
//! ## Existing drivers
//!
//! - [`uln2003`] – 28BYJ-48 stepper phase sequencer on a ULN2003 array
//! - [`sg90`] – TowerPro SG90 micro servo on a 50 Hz PWM channel

pub mod sg90;
pub mod uln2003;

pub use sg90::Sg90;
pub use uln2003::{Direction, MoveConfig, SpeedMode, StepSequencer};
