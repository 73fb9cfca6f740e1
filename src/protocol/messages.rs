// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command message protocol used by the vision host to drive the turret.
//!
//! Frame layout: `START_BYTE | ID | payload | checksum`, where the checksum is the wrapping sum
//! of the ID and payload bytes. Multi-byte fields are little-endian.

use crate::drivers::uln2003::{Direction, MoveConfig, SpeedMode};

/// Sync byte for the protocol.
pub const START_BYTE: u8 = 0xA5;

// Message IDs
pub const MSG_STEPPER_STEPS: u8 = 0x10;
pub const MSG_STEPPER_ANGLE: u8 = 0x11;
pub const MSG_STEPPER_RELEASE: u8 = 0x12;
pub const MSG_SERVO_POSITION: u8 = 0x20;
pub const MSG_SERVO_LEFT: u8 = 0x21;
pub const MSG_SERVO_RIGHT: u8 = 0x22;
pub const MSG_SERVO_DEFAULT: u8 = 0x23;
pub const MSG_SERVO_OFF: u8 = 0x24;

// Stepper flag bits
pub const FLAG_BACKWARD: u8 = 1 << 0;
pub const FLAG_FULL_STEP: u8 = 1 << 1;

/// Longest payload of any message.
pub const MAX_PAYLOAD_LEN: usize = 3;
/// Longest encoded frame.
pub const MAX_FRAME_LEN: usize = MAX_PAYLOAD_LEN + 3;

/// Turret commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    StepperSteps { config: MoveConfig, steps: u16 },
    StepperAngle { config: MoveConfig, degrees: u16 },
    StepperRelease,
    ServoPosition { pulse_us: u16 },
    ServoLeft { distance: u16 },
    ServoRight { distance: u16 },
    ServoDefault,
    ServoOff,
}

/// Payload length for a message ID, `None` if the ID is unknown.
pub fn payload_len(id: u8) -> Option<usize> {
    match id {
        MSG_STEPPER_STEPS | MSG_STEPPER_ANGLE => Some(3),
        MSG_SERVO_POSITION | MSG_SERVO_LEFT | MSG_SERVO_RIGHT => Some(2),
        MSG_STEPPER_RELEASE | MSG_SERVO_DEFAULT | MSG_SERVO_OFF => Some(0),
        _ => None,
    }
}

fn flags(config: MoveConfig) -> u8 {
    let mut flags = 0;
    if config.direction == Direction::Backward {
        flags |= FLAG_BACKWARD;
    }
    if config.speed == SpeedMode::FullStep {
        flags |= FLAG_FULL_STEP;
    }
    flags
}

fn config_from_flags(flags: u8) -> MoveConfig {
    let direction = if flags & FLAG_BACKWARD != 0 {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let speed = if flags & FLAG_FULL_STEP != 0 {
        SpeedMode::FullStep
    } else {
        SpeedMode::HalfStep
    };
    MoveConfig::new(direction, speed)
}

impl Command {
    pub fn id(&self) -> u8 {
        match self {
            Command::StepperSteps { .. } => MSG_STEPPER_STEPS,
            Command::StepperAngle { .. } => MSG_STEPPER_ANGLE,
            Command::StepperRelease => MSG_STEPPER_RELEASE,
            Command::ServoPosition { .. } => MSG_SERVO_POSITION,
            Command::ServoLeft { .. } => MSG_SERVO_LEFT,
            Command::ServoRight { .. } => MSG_SERVO_RIGHT,
            Command::ServoDefault => MSG_SERVO_DEFAULT,
            Command::ServoOff => MSG_SERVO_OFF,
        }
    }

    /// Encode a complete frame into `buf`, returning the number of bytes used.
    pub fn encode(&self, buf: &mut [u8; MAX_FRAME_LEN]) -> usize {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        let len = match *self {
            Command::StepperSteps { config, steps: value }
            | Command::StepperAngle {
                config,
                degrees: value,
            } => {
                payload[0] = flags(config);
                payload[1..3].copy_from_slice(&value.to_le_bytes());
                3
            }
            Command::ServoPosition { pulse_us: value }
            | Command::ServoLeft { distance: value }
            | Command::ServoRight { distance: value } => {
                payload[..2].copy_from_slice(&value.to_le_bytes());
                2
            }
            Command::StepperRelease | Command::ServoDefault | Command::ServoOff => 0,
        };

        let id = self.id();
        buf[0] = START_BYTE;
        buf[1] = id;
        buf[2..2 + len].copy_from_slice(&payload[..len]);
        buf[2 + len] = checksum(id, &payload[..len]);
        len + 3
    }

    /// Build a command from a validated ID and its payload.
    pub(crate) fn decode(id: u8, payload: &[u8]) -> Option<Command> {
        let word = |lo: usize| u16::from_le_bytes([payload[lo], payload[lo + 1]]);

        if payload.len() != payload_len(id)? {
            return None;
        }

        let cmd = match id {
            MSG_STEPPER_STEPS => Command::StepperSteps {
                config: config_from_flags(payload[0]),
                steps: word(1),
            },
            MSG_STEPPER_ANGLE => Command::StepperAngle {
                config: config_from_flags(payload[0]),
                degrees: word(1),
            },
            MSG_STEPPER_RELEASE => Command::StepperRelease,
            MSG_SERVO_POSITION => Command::ServoPosition { pulse_us: word(0) },
            MSG_SERVO_LEFT => Command::ServoLeft { distance: word(0) },
            MSG_SERVO_RIGHT => Command::ServoRight { distance: word(0) },
            MSG_SERVO_DEFAULT => Command::ServoDefault,
            MSG_SERVO_OFF => Command::ServoOff,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Wrapping sum of the ID and payload.
pub fn checksum(id: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(id, |acc, &b| acc.wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepper_frame_layout() {
        let cmd = Command::StepperSteps {
            config: MoveConfig::backward(SpeedMode::FullStep),
            steps: 0x0203,
        };
        let mut buf = [0u8; MAX_FRAME_LEN];
        let n = cmd.encode(&mut buf);

        assert_eq!(n, 6);
        assert_eq!(buf, [START_BYTE, 0x10, 0x03, 0x03, 0x02, 0x18]);
    }

    #[test]
    fn bare_frame_layout() {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let n = Command::ServoOff.encode(&mut buf);
        assert_eq!(&buf[..n], &[START_BYTE, MSG_SERVO_OFF, MSG_SERVO_OFF]);
    }

    #[test]
    fn decode_rejects_wrong_payload_length() {
        assert_eq!(Command::decode(MSG_SERVO_LEFT, &[1]), None);
        assert_eq!(Command::decode(0x7F, &[]), None);
        assert_eq!(
            Command::decode(MSG_SERVO_LEFT, &[0x2C, 0x01]),
            Some(Command::ServoLeft { distance: 300 })
        );
    }
}
