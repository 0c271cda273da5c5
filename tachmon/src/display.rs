// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use optotach_core::{Frame, TIMER_TICK_US};
use std::{fmt, time::Duration};

/// Tachometer timer frequency.
const TIMER_HZ: f64 = 1_000_000.0 / TIMER_TICK_US as f64;

/// Convert a tach period into propeller revolutions per minute.
pub fn tach_to_rpm(tach: u16, blades: u8) -> f64 {
    if tach == 0 || blades == 0 {
        0.0
    } else {
        60.0 * TIMER_HZ / (tach as f64 * blades as f64)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Scale {
    pub blades: u8,
    pub volt: f64,
    pub curr: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Record {
    pub elapsed: Duration,
    pub frame: Frame,
    pub rpm: f64,
    pub voltage: f64,
    pub current: f64,
}

impl Record {
    pub fn new(elapsed: Duration, frame: Frame, scale: &Scale) -> Self {
        Self {
            elapsed,
            frame,
            rpm: tach_to_rpm(frame.tach, scale.blades),
            voltage: frame.voltage as f64 * scale.volt,
            current: frame.current as f64 * scale.curr,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:10.3}  ", self.elapsed.as_secs_f64())?;
        if self.frame.is_stall() {
            write!(f, "tach=STOP  rpm={:8.1}", 0.0)?;
        } else {
            write!(f, "tach={:5}  rpm={:8.1}", self.frame.tach, self.rpm)?;
        }
        write!(f, "  U={:9.3}  I={:9.3}", self.voltage, self.current)
    }
}

/// Serial link statistics.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Stats {
    pub frames: u64,
    pub stalls: u64,
    pub corrupt: u64,
}

impl Stats {
    pub fn frame(&mut self, frame: &Frame) {
        self.frames += 1;
        if frame.is_stall() {
            self.stalls += 1;
        }
    }

    pub fn corrupt(&mut self) {
        self.corrupt += 1;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames: {}, stall events: {}, corrupt: {}",
            self.frames, self.stalls, self.corrupt
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rpm() {
        // 62500 ticks per second.
        assert_eq!(tach_to_rpm(62500, 1), 60.0);
        assert_eq!(tach_to_rpm(15625, 2), 120.0);
        assert_eq!(tach_to_rpm(0, 2), 0.0);
        assert_eq!(tach_to_rpm(100, 0), 0.0);
    }

    #[test]
    fn test_record() {
        let scale = Scale {
            blades: 2,
            volt: 0.5,
            curr: 2.0,
        };
        let r = Record::new(Duration::from_millis(1500), Frame::new(625, 100, 7), &scale);
        assert_eq!(r.rpm, 3000.0);
        assert_eq!(r.voltage, 50.0);
        assert_eq!(r.current, 14.0);
        let s = r.to_string();
        assert!(s.contains("1.500"));
        assert!(s.contains("tach=  625"));
        assert!(s.contains("rpm=  3000.0"));

        let r = Record::new(Duration::ZERO, Frame::new(0, 100, 7), &scale);
        assert!(r.to_string().contains("STOP"));
    }

    #[test]
    fn test_stats() {
        let mut stats = Stats::default();
        stats.frame(&Frame::new(100, 0, 0));
        stats.frame(&Frame::new(0, 0, 0));
        stats.corrupt();
        assert_eq!(
            stats,
            Stats {
                frames: 2,
                stalls: 1,
                corrupt: 1
            }
        );
        assert_eq!(stats.to_string(), "frames: 2, stall events: 1, corrupt: 1");
    }
}

// vim: ts=4 sw=4 expandtab
