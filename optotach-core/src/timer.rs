// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

/// 16 MHz / 256 -> 16 us per timer tick.
pub const TIMER_TICK_US: u8 = 16;

/// Free running 16 bit hardware timer stamp.
///
/// The counter wraps at 2^16 ticks (1.05 s).
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Timestamp(pub u16);

/// Unsigned distance between two [Timestamp]s.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Default)]
pub struct RelTimestamp(pub u16);

impl Timestamp {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_ticks(ticks: u16) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn ticks(self) -> u16 {
        self.0
    }
}

impl RelTimestamp {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_ticks(ticks: u16) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn from_micros(us: u32) -> Self {
        Self((us / TIMER_TICK_US as u32) as u16)
    }

    #[inline]
    pub const fn from_millis(ms: u32) -> Self {
        Self(((ms * 1000) / TIMER_TICK_US as u32) as u16)
    }

    #[inline]
    pub const fn ticks(self) -> u16 {
        self.0
    }
}

impl core::ops::Add<RelTimestamp> for Timestamp {
    type Output = Self;

    #[inline]
    fn add(self, other: RelTimestamp) -> Self::Output {
        Self(self.0.wrapping_add(other.0))
    }
}

impl core::ops::Sub for Timestamp {
    type Output = RelTimestamp;

    /// Elapsed ticks from `other` to `self`.
    /// Correct across one counter wrap.
    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        RelTimestamp(self.0.wrapping_sub(other.0))
    }
}

impl From<u16> for Timestamp {
    #[inline]
    fn from(stamp: u16) -> Self {
        Self(stamp)
    }
}

impl From<Timestamp> for u16 {
    #[inline]
    fn from(stamp: Timestamp) -> Self {
        stamp.0
    }
}

impl From<u16> for RelTimestamp {
    #[inline]
    fn from(relstamp: u16) -> Self {
        Self(relstamp)
    }
}

impl From<RelTimestamp> for u16 {
    #[inline]
    fn from(relstamp: RelTimestamp) -> Self {
        relstamp.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(RelTimestamp::from_millis(800).ticks(), 50000);
        assert_eq!(RelTimestamp::from_micros(1000).ticks(), 62);
        assert_eq!(RelTimestamp::from_micros(15).ticks(), 0);
    }

    #[test]
    fn test_wrap() {
        let a = Timestamp::from_ticks(0xFFF0);
        let b = a + RelTimestamp::from_ticks(0x20);
        assert_eq!(b, Timestamp::from_ticks(0x0010));
        assert_eq!(b - a, RelTimestamp::from_ticks(0x20));
        assert_eq!(a - b, RelTimestamp::from_ticks(0xFFE0));
        assert_eq!(a - a, RelTimestamp::new());
    }
}

// vim: ts=4 sw=4 expandtab
