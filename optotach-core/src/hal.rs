// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::timer::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum AdcChannel {
    /// Photodiode.
    Optical,
    /// Supply voltage transducer.
    Voltage,
    /// Supply current transducer.
    Current,
}

impl AdcChannel {
    /// Measurement order after a reportable event.
    pub fn select_next(&self) -> AdcChannel {
        match self {
            Self::Optical => Self::Voltage,
            Self::Voltage => Self::Current,
            Self::Current => Self::Optical,
        }
    }
}

/// Hardware operations needed by the measurement loop.
///
/// All operations are non-blocking.
pub trait Hal {
    /// Switch the ADC multiplexer to `chan` and start one conversion.
    fn start_conversion(&mut self, chan: AdcChannel);

    /// The most recently started conversion has completed.
    fn conversion_ready(&mut self) -> bool;

    /// 8 bit result of the most recently completed conversion.
    ///
    /// Starting a new conversion does not invalidate the result.
    fn read_sample(&mut self) -> u8;

    /// Full 10 bit result of the most recently completed conversion.
    fn read_wide_sample(&mut self) -> u16;

    /// Free running timer.
    fn now(&mut self) -> Timestamp;

    /// RPM signal output.
    fn set_digital_output(&mut self, high: bool);

    /// Failure indicator LED.
    fn set_indicator(&mut self, on: bool);

    fn transmit_ready(&mut self) -> bool;

    /// Only call this if [Hal::transmit_ready] returned true.
    fn transmit_byte(&mut self, data: u8);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_channel_cycle() {
        let c = AdcChannel::Optical;
        assert_eq!(c.select_next(), AdcChannel::Voltage);
        assert_eq!(c.select_next().select_next(), AdcChannel::Current);
        assert_eq!(c.select_next().select_next().select_next(), c);
    }
}

// vim: ts=4 sw=4 expandtab
