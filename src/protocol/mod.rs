// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial command protocol between the vision host and the turret firmware.
//!
//! - [`messages`] - Message IDs, [`Command`] and frame encoding.
//! - [`parser`] - Byte-at-a-time frame decoder.

pub mod messages;
pub mod parser;

pub use messages::Command;
pub use parser::Parser;
