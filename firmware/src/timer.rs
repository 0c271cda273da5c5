// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::hw::mcu;
use optotach_core::Timestamp;

/// CS: 256 -> 16 us per timer tick.
/// Must match [optotach_core::TIMER_TICK_US].
const TCCR1B_CS_256: u8 = 1 << 2;

#[rustfmt::skip]
pub fn timer_init(tc1: &mcu::TC1) {
    // Timer 1 configuration:
    // Normal mode, free running, no interrupts.
    // SAFETY: Raw register values as given by the data sheet.
    unsafe {
        tc1.timsk1().write(|w| w.bits(0));
        tc1.tccr1a().write(|w| w.bits(0));
        tc1.tccr1b().write(|w| w.bits(TCCR1B_CS_256));
    }
}

#[inline(always)]
pub fn timer_get(tc1: &mcu::TC1) -> Timestamp {
    tc1.tcnt1().read().bits().into()
}

// vim: ts=4 sw=4 expandtab
