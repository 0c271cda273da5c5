// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    bias::OptoBias,
    edge::OptoEdge,
    frame::{Frame, TxFrame},
    hal::{AdcChannel, Hal},
    period::{PeriodTracker, TachUpdate},
    timer::Timestamp,
};

/// Result of one reportable event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Publish {
    /// Time stamp of the optical sample that triggered the event.
    pub stamp: Timestamp,
    pub frame: Frame,
    /// The frame was accepted by the transmit buffer.
    /// False means that the frame has been dropped.
    pub loaded: bool,
}

/// The measurement main loop.
///
/// The optical channel is sampled continuously.
/// The voltage and current channels are only sampled on demand,
/// when a reportable tach event occurred.
pub struct Scheduler {
    bias: OptoBias,
    edge: OptoEdge,
    period: PeriodTracker,
    tx: TxFrame,
    failure_latch: bool,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            bias: OptoBias::new(),
            edge: OptoEdge::new(),
            period: PeriodTracker::new(Timestamp::new()),
            tx: TxFrame::new(),
            failure_latch: false,
        }
    }

    /// Start the first optical conversion.
    pub fn init<H: Hal>(&mut self, hal: &mut H) {
        self.period = PeriodTracker::new(hal.now());
        // Lamp test. Will be set to the failure state on the first event.
        hal.set_indicator(true);
        hal.start_conversion(AdcChannel::Optical);
    }

    /// Transmit one byte of the pending frame, if the UART can take it.
    ///
    /// Returns true, if a byte has been transmitted.
    pub fn drain_tx<H: Hal>(&mut self, hal: &mut H) -> bool {
        if self.tx.is_idle() {
            return false;
        }
        match self.tx.poll(hal.transmit_ready()) {
            Some(data) => {
                hal.transmit_byte(data);
                true
            }
            None => false,
        }
    }

    fn wait_conversion<H: Hal>(&mut self, hal: &mut H) {
        while !hal.conversion_ready() {
            self.drain_tx(hal);
        }
    }

    fn read_aux<H: Hal>(&mut self, hal: &mut H, chan: AdcChannel) -> u16 {
        hal.start_conversion(chan);
        self.wait_conversion(hal);
        hal.read_wide_sample()
    }

    /// Run one optical sampling step.
    pub fn run<H: Hal>(&mut self, hal: &mut H) -> Option<Publish> {
        self.wait_conversion(hal);
        hal.start_conversion(AdcChannel::Optical);
        let sample = hal.read_sample();
        let stamp = hal.now();

        let bias = self.bias.update(sample);
        let detection = self.edge.detect(sample, bias);
        if let Some(level) = detection.output() {
            hal.set_digital_output(level);
        }

        let TachUpdate::Reportable(tach) = self.period.update(stamp, detection.is_edge()) else {
            return None;
        };

        // Let the running optical conversion finish before switching the mux.
        self.wait_conversion(hal);

        let chan = AdcChannel::Optical.select_next();
        let voltage = self.read_aux(hal, chan);
        let chan = chan.select_next();
        let current = self.read_aux(hal, chan);
        hal.start_conversion(chan.select_next());

        let loaded = self.tx.try_load(tach, voltage, current);
        if !loaded {
            // The measurement is dropped. Remember that forever.
            self.failure_latch = true;
        }
        hal.set_indicator(self.failure_latch);

        Some(Publish {
            stamp,
            frame: Frame::new(tach, voltage, current),
            loaded,
        })
    }

    /// At least one frame has been dropped since power up.
    pub fn failure(&self) -> bool {
        self.failure_latch
    }

    pub fn bias(&self) -> u8 {
        self.bias.get()
    }

    pub fn tx_idle(&self) -> bool {
        self.tx.is_idle()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
