// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Message parser for the turret command protocol.
//!
//! Bytes are pushed one at a time as they arrive on the serial line. Frames with an unknown ID
//! or a bad checksum are dropped and the parser waits for the next start byte.

use crate::protocol::messages::*;

enum State {
    WaitStart,
    WaitId,
    Payload { id: u8, len: usize, filled: usize },
    WaitChecksum { id: u8, len: usize },
}

pub struct Parser {
    state: State,
    payload: [u8; MAX_PAYLOAD_LEN],
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            payload: [0; MAX_PAYLOAD_LEN],
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = State::WaitStart;
    }

    /// Process a single incoming byte. Returns `Some(Command)` if a complete packet is received.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                }
            }
            State::WaitId => {
                self.state = match payload_len(byte) {
                    Some(0) => State::WaitChecksum { id: byte, len: 0 },
                    Some(len) => State::Payload {
                        id: byte,
                        len,
                        filled: 0,
                    },
                    // Unknown message ID, reset state
                    None => State::WaitStart,
                };
            }
            State::Payload { id, len, filled } => {
                self.payload[filled] = byte;
                let filled = filled + 1;
                self.state = if filled == len {
                    State::WaitChecksum { id, len }
                } else {
                    State::Payload { id, len, filled }
                };
            }
            State::WaitChecksum { id, len } => {
                self.state = State::WaitStart; // Reset for next message

                if byte == checksum(id, &self.payload[..len]) {
                    return Command::decode(id, &self.payload[..len]);
                }
            }
        }
        None
    }

    /// Feed a buffer, calling `on_command` for every complete frame.
    pub fn push_all<F: FnMut(Command)>(&mut self, bytes: &[u8], mut on_command: F) {
        for &b in bytes {
            if let Some(cmd) = self.push(b) {
                on_command(cmd);
            }
        }
    }
}
