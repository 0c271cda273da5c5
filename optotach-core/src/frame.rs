// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Serial telemetry frame.
//!
//! Layout (all fields little endian):
//!
//! | offset | size | content                        |
//! |--------|------|--------------------------------|
//! | 0      | 1    | header, [FRAME_HEADER]         |
//! | 1      | 1    | checksum over offset 2..8      |
//! | 2      | 2    | tach period in timer ticks     |
//! | 4      | 2    | voltage, raw 10 bit ADC        |
//! | 6      | 2    | current, raw 10 bit ADC        |
//!
//! There is no escaping. A receiver synchronizes on the header byte
//! and confirms the synchronization with the checksum.

/// Frame start marker.
pub const FRAME_HEADER: u8 = 0xFA;
/// Size of one frame on the wire.
pub const FRAME_SIZE: usize = 1 + 1 + 2 + 2 + 2;

const OFFS_CHECKSUM: usize = 1;
const OFFS_PAYLOAD: usize = 2;

/// 8 bit wrapping sum.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, &b| acc.wrapping_add(b))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Frame {
    /// Period in timer ticks. Zero for a stall event.
    pub tach: u16,
    pub voltage: u16,
    pub current: u16,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrameError {
    BadHeader(u8),
    BadChecksum { expected: u8, actual: u8 },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::BadHeader(h) => write!(f, "Invalid frame header 0x{h:02X}"),
            FrameError::BadChecksum { expected, actual } => write!(
                f,
                "Frame checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}"
            ),
        }
    }
}

impl core::error::Error for FrameError {}

impl Frame {
    pub const fn new(tach: u16, voltage: u16, current: u16) -> Self {
        Self {
            tach,
            voltage,
            current,
        }
    }

    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        let tach = self.tach.to_le_bytes();
        let voltage = self.voltage.to_le_bytes();
        let current = self.current.to_le_bytes();
        let mut data = [
            FRAME_HEADER,
            0,
            tach[0],
            tach[1],
            voltage[0],
            voltage[1],
            current[0],
            current[1],
        ];
        data[OFFS_CHECKSUM] = checksum(&data[OFFS_PAYLOAD..]);
        data
    }

    pub fn decode(data: &[u8; FRAME_SIZE]) -> Result<Self, FrameError> {
        if data[0] != FRAME_HEADER {
            return Err(FrameError::BadHeader(data[0]));
        }
        let expected = checksum(&data[OFFS_PAYLOAD..]);
        let actual = data[OFFS_CHECKSUM];
        if expected != actual {
            return Err(FrameError::BadChecksum { expected, actual });
        }
        Ok(Self {
            tach: u16::from_le_bytes([data[2], data[3]]),
            voltage: u16::from_le_bytes([data[4], data[5]]),
            current: u16::from_le_bytes([data[6], data[7]]),
        })
    }

    pub fn is_stall(&self) -> bool {
        self.tach == 0
    }
}

/// Single frame transmit buffer.
///
/// At most one frame is in flight.
/// `next == FRAME_SIZE` means that the buffer is drained and can be loaded.
pub struct TxFrame {
    data: [u8; FRAME_SIZE],
    next: u8,
}

impl TxFrame {
    pub const fn new() -> Self {
        Self {
            data: [0; FRAME_SIZE],
            next: FRAME_SIZE as u8,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.next as usize >= FRAME_SIZE
    }

    /// Number of bytes of the current frame still waiting for transmission.
    pub fn pending(&self) -> usize {
        FRAME_SIZE - (self.next as usize).min(FRAME_SIZE)
    }

    /// Load a new frame for transmission.
    ///
    /// Returns false and keeps the in-flight frame untouched,
    /// if the previous frame has not been drained, yet.
    pub fn try_load(&mut self, tach: u16, voltage: u16, current: u16) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.data = Frame::new(tach, voltage, current).encode();
        self.next = 0;
        true
    }

    /// Get the next byte to transmit, if the transmitter can take one.
    pub fn poll(&mut self, tx_ready: bool) -> Option<u8> {
        if self.is_idle() || !tx_ready {
            return None;
        }
        let data = self.data[self.next as usize];
        self.next += 1;
        Some(data)
    }

    /// Raw buffer contents.
    pub fn data(&self) -> &[u8; FRAME_SIZE] {
        &self.data
    }
}

impl Default for TxFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver side frame synchronization on a raw byte stream.
pub struct FrameSync {
    buf: [u8; FRAME_SIZE],
    len: usize,
}

impl FrameSync {
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_SIZE],
            len: 0,
        }
    }

    /// Feed one received byte.
    ///
    /// Bytes outside of a frame are silently skipped.
    /// A complete candidate frame yields `Some(Ok(..))` if valid.
    /// A candidate with a bad checksum yields `Some(Err(..))` and
    /// the search for the next header restarts behind the bad header.
    pub fn push(&mut self, byte: u8) -> Option<Result<Frame, FrameError>> {
        if self.len == 0 && byte != FRAME_HEADER {
            return None;
        }
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len < FRAME_SIZE {
            return None;
        }

        let res = Frame::decode(&self.buf);
        if res.is_ok() {
            self.len = 0;
        } else {
            self.resync();
        }
        Some(res)
    }

    /// Drop the current header and restart at the next header candidate.
    fn resync(&mut self) {
        match self.buf[1..self.len].iter().position(|&b| b == FRAME_HEADER) {
            Some(pos) => {
                let start = pos + 1;
                self.buf.copy_within(start..self.len, 0);
                self.len -= start;
            }
            None => self.len = 0,
        }
    }

    /// Number of bytes buffered for the next frame.
    pub fn buffered(&self) -> usize {
        self.len
    }
}

impl Default for FrameSync {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
