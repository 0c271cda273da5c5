// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

/// Number of optical samples in the DC bias window.
pub const OPTO_DC_HISTORY_LEN: usize = 1024;

/// Moving average over the most recent `SIZE` samples.
///
/// Until the window is filled for the first time, the average is
/// calculated over the samples seen so far.
/// Afterwards the oldest sample is replaced in place.
pub struct DcBias<const SIZE: usize> {
    hist: [u8; SIZE],
    count: usize,
    index: usize,
    sum: u32,
    bias: u8,
}

pub type OptoBias = DcBias<OPTO_DC_HISTORY_LEN>;

impl<const SIZE: usize> DcBias<SIZE> {
    const WINDOW: u32 = {
        assert!(SIZE > 0);
        assert!(SIZE as u64 * u8::MAX as u64 <= u32::MAX as u64);
        SIZE as u32
    };

    pub const fn new() -> Self {
        Self {
            hist: [0; SIZE],
            count: 0,
            index: 0,
            sum: 0,
            bias: 0,
        }
    }

    /// Add a new sample and return the new bias estimate.
    pub fn update(&mut self, sample: u8) -> u8 {
        let bias = if self.count == SIZE {
            self.sum -= self.hist[self.index] as u32;
            self.hist[self.index] = sample;
            self.sum += sample as u32;
            self.index += 1;
            if self.index >= SIZE {
                self.index = 0;
            }
            self.sum / Self::WINDOW
        } else {
            self.hist[self.count] = sample;
            self.count += 1;
            self.sum += sample as u32;
            self.sum / self.count as u32
        };
        // The mean of u8 values always fits.
        self.bias = bias as u8;
        self.bias
    }

    /// The most recent bias estimate.
    pub fn get(&self) -> u8 {
        self.bias
    }

    /// Number of valid samples in the window.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_warm(&self) -> bool {
        self.count == SIZE
    }

    /// Iterate the valid samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let (newer, older) = self.hist[..self.count].split_at(self.index);
        older.iter().chain(newer.iter()).copied()
    }
}

impl<const SIZE: usize> Default for DcBias<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn test_warmup() {
        let mut b = DcBias::<8>::new();
        assert_eq!(b.update(10), 10);
        assert_eq!(b.update(11), 10);
        assert_eq!(b.update(12), 11);
        assert_eq!(b.update(255), 72);
        assert_eq!(b.count(), 4);
        assert!(!b.is_warm());
        assert_eq!(b.iter().collect::<Vec<_>>(), [10, 11, 12, 255]);
    }

    #[test]
    fn test_steady() {
        let mut b = DcBias::<4>::new();
        for s in [4, 8, 12, 16] {
            b.update(s);
        }
        assert!(b.is_warm());
        assert_eq!(b.get(), 10);
        // Evicts the 4.
        assert_eq!(b.update(0), 9);
        assert_eq!(b.iter().collect::<Vec<_>>(), [8, 12, 16, 0]);
        // Evicts the 8.
        assert_eq!(b.update(100), 32);
        assert_eq!(b.iter().collect::<Vec<_>>(), [12, 16, 0, 100]);
        assert_eq!(b.count(), 4);
    }

    #[test]
    fn test_no_step_at_window_fill() {
        let mut b = OptoBias::new();
        for _ in 0..OPTO_DC_HISTORY_LEN * 3 {
            assert_eq!(b.update(100), 100);
        }
    }

    #[test]
    fn test_random_sequences() {
        for _ in 0..8 {
            let mut b = OptoBias::new();
            let mut reference = VecDeque::new();
            let len = rand::random_range(1..OPTO_DC_HISTORY_LEN * 3);
            for _ in 0..len {
                let sample: u8 = rand::random();
                reference.push_back(sample);
                if reference.len() > OPTO_DC_HISTORY_LEN {
                    reference.pop_front();
                }
                let sum: u32 = reference.iter().map(|&s| s as u32).sum();
                let expected = sum / reference.len() as u32;
                assert_eq!(b.update(sample) as u32, expected);
            }
            assert_eq!(b.count(), reference.len());
            assert!(b.iter().eq(reference.iter().copied()));
        }
    }
}

// vim: ts=4 sw=4 expandtab
