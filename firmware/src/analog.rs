// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::hw::mcu;
use optotach_core::AdcChannel;

/// Reference AVcc.
const ADMUX_REFS_AVCC: u8 = 1 << 6;
/// Left adjusted result. The upper 8 bits are in ADCH.
const ADMUX_ADLAR: u8 = 1 << 5;

const ADCSRA_ADEN: u8 = 1 << 7;
const ADCSRA_ADSC: u8 = 1 << 6;
const ADCSRA_ADIF: u8 = 1 << 4;
/// 16 MHz / 64 = 250 kHz ADC clock.
const ADCSRA_ADPS_64: u8 = (1 << 2) | (1 << 1);

/// Disable the digital input buffers of ADC0..ADC5.
const DIDR0_ADC0_5: u8 = 0x3F;

/// ADC multiplexer input.
const fn adc_mux(chan: AdcChannel) -> u8 {
    match chan {
        AdcChannel::Optical => 0, // A0
        AdcChannel::Current => 6, // A6
        AdcChannel::Voltage => 7, // A7
    }
}

#[rustfmt::skip]
pub fn adc_init(adc: &mcu::ADC) {
    // SAFETY: Raw register values as given by the data sheet.
    unsafe {
        adc.didr0().write(|w| w.bits(DIDR0_ADC0_5));
        adc.admux().write(|w| {
            w.bits(ADMUX_REFS_AVCC |
                   ADMUX_ADLAR |
                   adc_mux(AdcChannel::Optical))
        });
        adc.adcsrb().write(|w| w.bits(0));
        adc.adcsra().write(|w| {
            w.bits(ADCSRA_ADEN |
                   ADCSRA_ADSC |
                   ADCSRA_ADIF |
                   ADCSRA_ADPS_64)
        });
    }

    // The first conversion after enabling the ADC takes longer.
    while !adc_ready(adc) {}
}

#[rustfmt::skip]
pub fn adc_start(adc: &mcu::ADC, chan: AdcChannel) {
    // SAFETY: Raw register values as given by the data sheet.
    unsafe {
        adc.admux().write(|w| {
            w.bits(ADMUX_REFS_AVCC |
                   ADMUX_ADLAR |
                   adc_mux(chan))
        });
        // Writing a one to ADIF clears the flag.
        adc.adcsra().modify(|r, w| {
            w.bits(r.bits() | ADCSRA_ADSC | ADCSRA_ADIF)
        });
    }
}

#[inline]
pub fn adc_ready(adc: &mcu::ADC) -> bool {
    adc.adcsra().read().adif().bit_is_set()
}

/// Upper 8 bits of the last conversion result.
#[inline]
pub fn adc_read8(adc: &mcu::ADC) -> u8 {
    (adc.adc().read().bits() >> 8) as u8
}

/// Full 10 bit result of the last conversion.
#[inline]
pub fn adc_read10(adc: &mcu::ADC) -> u16 {
    adc.adc().read().bits() >> 6
}

// vim: ts=4 sw=4 expandtab
