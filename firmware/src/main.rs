// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Optical propeller tachometer for the Arduino Nano v3.
//!
//! Connections:
//! - A0: photodiode cathode (anode to PC1 = GND)
//! - A6: current transducer
//! - A7: voltage transducer
//! - D2: RPM signal output
//! - D13: failure LED

#![no_std]
#![no_main]
#![feature(asm_experimental_arch)]

mod analog;
mod hw;
mod ports;
mod timer;
mod uart;
mod wdt;

use crate::{
    analog::adc_init,
    hw::{Board, Peripherals},
    ports::ports_init,
    timer::timer_init,
    uart::uart_init,
    wdt::{wdt_init, wdt_poke},
};
use optotach_core::Scheduler;

#[avr_device::entry]
fn main() -> ! {
    wdt_init();

    // SAFETY: This is the first and only time the peripherals are taken.
    //         `take()` would pull the panic path into the binary.
    let dp = unsafe { Peripherals::steal() };

    // SAFETY: We are running in init with IRQs disabled.
    unsafe {
        ports_init(&dp.PORTB, &dp.PORTC, &dp.PORTD);
    }
    uart_init(&dp.USART0);
    adc_init(&dp.ADC);
    timer_init(&dp.TC1);

    let mut board = Board {
        ADC: dp.ADC,
        TC1: dp.TC1,
        USART0: dp.USART0,
        PORTB: dp.PORTB,
        PORTD: dp.PORTD,
    };

    // Interrupts stay disabled.
    // Everything runs from this loop.
    let mut sched = Scheduler::new();
    sched.init(&mut board);

    loop {
        sched.run(&mut board);

        #[cfg(feature = "debug")]
        ports::debug_toggle(&board.PORTB);

        wdt_poke(&dp.WDT);
    }
}

// vim: ts=4 sw=4 expandtab
