// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::hw::mcu;

const FCPU: u32 = 16_000_000;
const BAUD: u32 = 115_200;
/// Rounded to 8 -> 111111 baud. 3.5% error.
const UBRR: u16 = ((FCPU + 8 * BAUD) / (16 * BAUD) - 1) as u16;

const UCSR0B_RXEN0: u8 = 1 << 4;
const UCSR0B_TXEN0: u8 = 1 << 3;
/// 8 data bits.
const UCSR0C_UCSZ_8: u8 = (1 << 2) | (1 << 1);

#[rustfmt::skip]
pub fn uart_init(usart: &mcu::USART0) {
    // 8N1, no interrupts. The transmitter is polled.
    // SAFETY: Raw register values as given by the data sheet.
    unsafe {
        usart.ucsr0a().write(|w| w.bits(0));
        usart.ucsr0b().write(|w| w.bits(UCSR0B_RXEN0 | UCSR0B_TXEN0));
        usart.ucsr0c().write(|w| w.bits(UCSR0C_UCSZ_8));
        usart.ubrr0().write(|w| w.bits(UBRR));
    }
}

/// The transmit data register is empty.
#[inline]
pub fn uart_tx_ready(usart: &mcu::USART0) -> bool {
    usart.ucsr0a().read().udre0().bit_is_set()
}

#[inline]
pub fn uart_tx(usart: &mcu::USART0, data: u8) {
    // SAFETY: Any value can be written to the data register.
    usart.udr0().write(|w| unsafe { w.bits(data) });
}

// vim: ts=4 sw=4 expandtab
