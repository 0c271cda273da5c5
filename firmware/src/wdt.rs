// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::hw::mcu;

pub fn wdt_init() {
    // SAFETY: The asm code only accesses the MCUSR and WDTCSR registers
    //         which are not accessed from anywhere else in the program.
    //         The second WDTCSR write must happen within 4 cycles
    //         of the first one. Therefore, this is done in asm.
    unsafe {
        // Enable WDT with timeout 125 ms
        core::arch::asm!(
            "wdr",
            "ldi {tmp}, 0x00",
            "out {MCUSR}, {tmp}", // WDRF=0
            "ldi {tmp}, 0x18", // WDCE=1, WDE=1
            "sts {WDTCSR}, {tmp}",
            "ldi {tmp}, 0x0B", // WDE=1, WDP3=0, WDP2=0, WDP1=1, WDP0=1
            "sts {WDTCSR}, {tmp}",
            tmp = out(reg_upper) _,
            MCUSR = const 0x34,
            WDTCSR = const 0x60,
            options(nostack, preserves_flags)
        );
    }
}

pub fn wdt_poke(_wp: &mcu::WDT) {
    avr_device::asm::wdr();
}

/// Reset the system.
#[inline(always)]
#[allow(clippy::empty_loop)]
pub fn reset_system() -> ! {
    loop {
        // Wait for the watchdog timer to trigger and reset the system.
    }
}

#[inline(always)]
#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    reset_system();
}

// vim: ts=4 sw=4 expandtab
