// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

pub use atmega::{self as mcu, Peripherals};
pub use avr_device::atmega328p as atmega;

use crate::{
    analog::{adc_read8, adc_read10, adc_ready, adc_start},
    ports::{led, rpm_out},
    timer::timer_get,
    uart::{uart_tx, uart_tx_ready},
};
use optotach_core::{AdcChannel, Hal, Timestamp};

/// Arduino Nano v3 peripherals used by the measurement loop.
#[allow(non_snake_case)]
pub struct Board {
    pub ADC: mcu::ADC,
    pub TC1: mcu::TC1,
    pub USART0: mcu::USART0,
    pub PORTB: mcu::PORTB,
    pub PORTD: mcu::PORTD,
}

impl Hal for Board {
    #[inline]
    fn start_conversion(&mut self, chan: AdcChannel) {
        adc_start(&self.ADC, chan);
    }

    #[inline]
    fn conversion_ready(&mut self) -> bool {
        adc_ready(&self.ADC)
    }

    #[inline]
    fn read_sample(&mut self) -> u8 {
        adc_read8(&self.ADC)
    }

    #[inline]
    fn read_wide_sample(&mut self) -> u16 {
        adc_read10(&self.ADC)
    }

    #[inline]
    fn now(&mut self) -> Timestamp {
        timer_get(&self.TC1)
    }

    #[inline]
    fn set_digital_output(&mut self, high: bool) {
        rpm_out(&self.PORTD, high);
    }

    #[inline]
    fn set_indicator(&mut self, on: bool) {
        led(&self.PORTB, on);
    }

    #[inline]
    fn transmit_ready(&mut self) -> bool {
        uart_tx_ready(&self.USART0)
    }

    #[inline]
    fn transmit_byte(&mut self, data: u8) {
        uart_tx(&self.USART0, data);
    }
}

// vim: ts=4 sw=4 expandtab
