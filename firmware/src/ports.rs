// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

#![allow(unused_unsafe)]

use crate::hw::mcu;

/// PD2: RPM signal output.
const RPM_OUT_BIT: u8 = 2;
/// PB5: Failure LED.
const LED_BIT: u8 = 5;
/// PB4: Debug.
#[cfg(feature = "debug")]
const DEBUG_BIT: u8 = 4;

fn pin_input(_bit: usize) -> u8 {
    0
}
fn pin_output(bit: usize) -> u8 {
    1 << bit
}
fn pin_low(_bit: usize) -> u8 {
    0
}
fn pin_high(bit: usize) -> u8 {
    1 << bit
}
fn pin_floating(_bit: usize) -> u8 {
    0
}
fn pin_pullup(bit: usize) -> u8 {
    1 << bit
}

/// # Safety
///
/// Must only be called during init with IRQs disabled.
#[rustfmt::skip]
pub unsafe fn ports_init(pb: &mcu::PORTB, pc: &mcu::PORTC, pd: &mcu::PORTD) {
    // PORTB
    pb.portb().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_pullup(0) | // sensor input
                pin_pullup(1) | // n/c
                pin_pullup(2) | // n/c
                pin_pullup(3) | // ISP MOSI
                pin_high(4) |   // ISP MISO + debug
                pin_high(5) |   // LED, on for lamp test
                pin_floating(6) | // XTAL1
                pin_floating(7), // XTAL2
            )
        }
    });
    pb.ddrb().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_input(0) | // sensor input
                pin_input(1) | // n/c
                pin_input(2) | // n/c
                pin_input(3) | // ISP MOSI
                pin_output(4) | // ISP MISO + debug
                pin_output(5) | // LED
                pin_input(6) | // XTAL1
                pin_input(7), // XTAL2
            )
        }
    });

    // PORTC
    pc.portc().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_pullup(0) | // photodiode cathode, ADC0
                pin_low(1) | // photodiode anode, GND
                pin_floating(2) | // n/c, digital input disabled
                pin_floating(3) | // n/c, digital input disabled
                pin_floating(4) | // n/c, digital input disabled
                pin_floating(5) | // n/c, digital input disabled
                pin_floating(6) | // RESET
                pin_floating(7), // n/a
            )
        }
    });
    pc.ddrc().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_input(0) | // photodiode cathode, ADC0
                pin_output(1) | // photodiode anode, GND
                pin_input(2) | // n/c
                pin_input(3) | // n/c
                pin_input(4) | // n/c
                pin_input(5) | // n/c
                pin_input(6) | // RESET
                pin_input(7), // n/a
            )
        }
    });

    // PORTD
    pd.portd().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_pullup(0) | // UART RXD
                pin_high(1) | // UART TXD
                pin_high(2) | // RPM out
                pin_pullup(3) | // n/c
                pin_pullup(4) | // n/c
                pin_pullup(5) | // n/c
                pin_pullup(6) | // n/c
                pin_pullup(7), // n/c
            )
        }
    });
    pd.ddrd().write(|w| {
        // SAFETY: We are running in init with IRQs disabled.
        unsafe {
            w.bits(
                pin_input(0) | // UART RXD
                pin_input(1) | // UART TXD, overridden by USART
                pin_output(2) | // RPM out
                pin_input(3) | // n/c
                pin_input(4) | // n/c
                pin_input(5) | // n/c
                pin_input(6) | // n/c
                pin_input(7), // n/c
            )
        }
    });
}

#[inline(always)]
fn modify_bit(value: u8, bit: u8, set: bool) -> u8 {
    if set {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

pub fn rpm_out(pd: &mcu::PORTD, high: bool) {
    // SAFETY: Only the RPM output bit is changed.
    pd.portd()
        .modify(|r, w| unsafe { w.bits(modify_bit(r.bits(), RPM_OUT_BIT, high)) });
}

pub fn led(pb: &mcu::PORTB, on: bool) {
    // SAFETY: Only the LED bit is changed.
    pb.portb()
        .modify(|r, w| unsafe { w.bits(modify_bit(r.bits(), LED_BIT, on)) });
}

#[cfg(feature = "debug")]
pub fn debug_toggle(pb: &mcu::PORTB) {
    // Writing a one to PINx toggles the PORTx bit.
    // SAFETY: Only the debug bit is written.
    pb.pinb().write(|w| unsafe { w.bits(1 << DEBUG_BIT) });
}

// vim: ts=4 sw=4 expandtab
