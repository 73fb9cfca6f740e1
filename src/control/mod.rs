// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Turret Control
//!
//! This module composes the device drivers into the pan/tilt turret steered by the vision host.
//!
//! ## Modules
//!
//! - [`turret`] - Command execution and box-following for the stepper/servo pair.

pub mod turret;

pub use turret::{Aim, Turret, TurretError};
