// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

/// AC amplitude above the DC bias that starts a blade passage.
///
/// Tied to the 8 bit optical sample resolution.
pub const OPTO_THRESHOLD: i16 = 30;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Detection {
    /// Signal is below the entry threshold. Output is de-asserted.
    Idle,
    /// Rising edge recognized in this step. Output is asserted.
    Edge,
    /// Still inside of a blade passage. Output is left alone.
    Peak,
}

impl Detection {
    pub fn is_edge(self) -> bool {
        self == Detection::Edge
    }

    /// The level the synchronized output has to be driven to, if any.
    pub fn output(self) -> Option<bool> {
        match self {
            Detection::Idle => Some(false),
            Detection::Edge => Some(true),
            Detection::Peak => None,
        }
    }
}

/// Hysteresis edge detector.
///
/// A passage starts when the AC part exceeds `THRES`
/// and ends when it drops below `THRES / 4`.
pub struct EdgeDetector<const THRES: i16> {
    in_peak: bool,
}

pub type OptoEdge = EdgeDetector<OPTO_THRESHOLD>;

impl<const THRES: i16> EdgeDetector<THRES> {
    pub const HIGH_THRESHOLD: i16 = THRES;
    pub const LOW_THRESHOLD: i16 = THRES / 4;

    pub const fn new() -> Self {
        Self { in_peak: false }
    }

    pub fn in_peak(&self) -> bool {
        self.in_peak
    }

    pub fn detect(&mut self, sample: u8, bias: u8) -> Detection {
        let ac = sample as i16 - bias as i16;
        if self.in_peak {
            if ac < Self::LOW_THRESHOLD {
                self.in_peak = false;
            }
            Detection::Peak
        } else if ac > Self::HIGH_THRESHOLD {
            self.in_peak = true;
            Detection::Edge
        } else {
            Detection::Idle
        }
    }
}

impl<const THRES: i16> Default for EdgeDetector<THRES> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(OptoEdge::HIGH_THRESHOLD, 30);
        assert_eq!(OptoEdge::LOW_THRESHOLD, 7);
    }

    #[test]
    fn test_hysteresis() {
        let mut e = OptoEdge::new();
        assert_eq!(e.detect(130, 100), Detection::Idle);
        assert_eq!(e.detect(131, 100), Detection::Edge);
        assert!(e.in_peak());
        // Dropping below the entry threshold does not end the passage.
        assert_eq!(e.detect(110, 100), Detection::Peak);
        assert_eq!(e.detect(140, 100), Detection::Peak);
        assert_eq!(e.detect(107, 100), Detection::Peak);
        assert!(e.in_peak());
        // The exit step itself does not touch the output.
        assert_eq!(e.detect(106, 100), Detection::Peak);
        assert!(!e.in_peak());
        assert_eq!(e.detect(106, 100), Detection::Idle);
        assert_eq!(e.detect(200, 100), Detection::Edge);
    }

    #[test]
    fn test_negative_ac() {
        let mut e = OptoEdge::new();
        assert_eq!(e.detect(0, 255), Detection::Idle);
        assert_eq!(e.detect(255, 0), Detection::Edge);
        assert_eq!(e.detect(0, 255), Detection::Peak);
        assert_eq!(e.detect(0, 255), Detection::Idle);
    }

    #[test]
    fn test_output() {
        assert_eq!(Detection::Idle.output(), Some(false));
        assert_eq!(Detection::Edge.output(), Some(true));
        assert_eq!(Detection::Peak.output(), None);
        assert!(Detection::Edge.is_edge());
        assert!(!Detection::Peak.is_edge());
    }

    #[test]
    fn test_no_double_trigger() {
        let mut e = OptoEdge::new();
        let mut edges = 0;
        let mut exits = 0;
        for _ in 0..10_000 {
            let was_peak = e.in_peak();
            let sample: u8 = rand::random();
            if e.detect(sample, 128).is_edge() {
                // Every edge must be preceded by a return to idle.
                assert!(!was_peak);
                edges += 1;
            }
            if was_peak && !e.in_peak() {
                exits += 1;
            }
        }
        assert!(edges == exits || edges == exits + 1);
    }
}

// vim: ts=4 sw=4 expandtab
