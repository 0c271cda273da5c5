// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::timer::{RelTimestamp, Timestamp};

/// The rotor is considered to be stopped, if there was no edge for this long.
pub const TACH_TIMEOUT: RelTimestamp = RelTimestamp::from_millis(800);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TachUpdate {
    NotReportable,
    /// Measured period in timer ticks.
    /// Zero means that the rotor stopped.
    Reportable(u16),
}

pub struct PeriodTracker {
    prev_stamp: Timestamp,
    timed_out: bool,
}

impl PeriodTracker {
    /// Start in the timed-out state.
    /// The first edge only provides the reference time stamp.
    pub const fn new(now: Timestamp) -> Self {
        Self {
            prev_stamp: now,
            timed_out: true,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn update(&mut self, now: Timestamp, edge: bool) -> TachUpdate {
        if edge {
            let ret = if self.timed_out {
                self.timed_out = false;
                TachUpdate::NotReportable
            } else {
                TachUpdate::Reportable((now - self.prev_stamp).ticks())
            };
            self.prev_stamp = now;
            ret
        } else if !self.timed_out && now - self.prev_stamp > TACH_TIMEOUT {
            self.timed_out = true;
            self.prev_stamp = now;
            TachUpdate::Reportable(0)
        } else {
            TachUpdate::NotReportable
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(ticks: u16) -> Timestamp {
        Timestamp::from_ticks(ticks)
    }

    #[test]
    fn test_timeout_value() {
        assert_eq!(TACH_TIMEOUT.ticks(), 50000);
    }

    #[test]
    fn test_first_edge_absorbed() {
        let mut p = PeriodTracker::new(t(0));
        assert!(p.is_timed_out());
        assert_eq!(p.update(t(100), false), TachUpdate::NotReportable);
        assert_eq!(p.update(t(200), true), TachUpdate::NotReportable);
        assert!(!p.is_timed_out());
        assert_eq!(p.update(t(1000), true), TachUpdate::Reportable(800));
        assert_eq!(p.update(t(1500), true), TachUpdate::Reportable(500));
    }

    #[test]
    fn test_periods_wrap() {
        let mut p = PeriodTracker::new(t(0));
        p.update(t(0xFF00), true);
        assert_eq!(p.update(t(0x0100), true), TachUpdate::Reportable(0x200));
        assert_eq!(p.update(t(0x0101), true), TachUpdate::Reportable(1));
    }

    #[test]
    fn test_random_periods() {
        let mut p = PeriodTracker::new(t(0));
        let mut now = t(rand::random());
        p.update(now, true);
        for _ in 0..1000 {
            let delta: u16 = rand::random_range(1..=TACH_TIMEOUT.ticks());
            now = now + RelTimestamp::from_ticks(delta);
            assert_eq!(p.update(now, true), TachUpdate::Reportable(delta));
        }
    }

    #[test]
    fn test_stall() {
        let mut p = PeriodTracker::new(t(0));
        p.update(t(1000), true);
        assert_eq!(p.update(t(1000 + 50000), false), TachUpdate::NotReportable);
        assert_eq!(p.update(t(1000 + 50001), false), TachUpdate::Reportable(0));
        assert!(p.is_timed_out());

        // Exactly one stall event, no matter how long the rotor stands still.
        let mut now = t(1000 + 50001);
        for _ in 0..100 {
            now = now + RelTimestamp::from_ticks(10000);
            assert_eq!(p.update(now, false), TachUpdate::NotReportable);
        }

        // The first edge after the stall is absorbed.
        assert_eq!(p.update(t(7), true), TachUpdate::NotReportable);
        assert_eq!(p.update(t(507), true), TachUpdate::Reportable(500));
    }

    #[test]
    fn test_stall_across_wrap() {
        let mut p = PeriodTracker::new(t(0));
        p.update(t(60000), true);
        assert_eq!(p.update(t(44464), false), TachUpdate::NotReportable);
        assert_eq!(p.update(t(44465), false), TachUpdate::Reportable(0));
    }
}

// vim: ts=4 sw=4 expandtab
