// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

#![forbid(unsafe_code)]

mod display;
mod serial;

use crate::{
    display::{Record, Scale, Stats},
    serial::{DEFAULT_PORT, SerEvent, run_serial},
};
use anyhow as ah;
use clap::Parser;
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Monitor the frames sent by the optical tachometer.
#[derive(Parser, Debug)]
struct Opts {
    /// Serial port device.
    port: Option<String>,

    /// Serial baud rate.
    #[arg(short, long, default_value_t = 115_200)]
    baud: u32,

    /// Number of propeller blades passing the sensor per revolution.
    #[arg(short = 'n', long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    blades: u8,

    /// Voltage channel scale factor.
    #[arg(long, default_value_t = 1.0)]
    volt_scale: f64,

    /// Current channel scale factor.
    #[arg(long, default_value_t = 1.0)]
    curr_scale: f64,

    /// Seconds between statistics lines. 0 disables them.
    #[arg(short, long, default_value_t = 5)]
    stats_interval: u64,
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    let port = opts.port.clone().unwrap_or_else(|| DEFAULT_PORT.to_string());
    let baud = opts.baud;
    let scale = Scale {
        blades: opts.blades,
        volt: opts.volt_scale,
        curr: opts.curr_scale,
    };
    let stats_interval = Duration::from_secs(opts.stats_interval);

    let (ser_notify_tx, ser_notify_rx) = mpsc::channel();

    thread::spawn(move || {
        loop {
            if let Err(e) = run_serial(&port, baud, &ser_notify_tx) {
                eprintln!("Serial error: {e:?}");
            }
            thread::sleep(Duration::from_millis(5000));
        }
    });

    let start = Instant::now();
    let mut last_stats = start;
    let mut stats = Stats::default();
    loop {
        match ser_notify_rx.recv_timeout(Duration::from_millis(500)) {
            Ok(SerEvent::Frame(frame)) => {
                stats.frame(&frame);
                println!("{}", Record::new(start.elapsed(), frame, &scale));
            }
            Ok(SerEvent::Corrupt(e)) => {
                stats.corrupt();
                eprintln!("Corrupt frame: {e}");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => (),
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }

        if !stats_interval.is_zero() && last_stats.elapsed() >= stats_interval {
            last_stats = Instant::now();
            eprintln!("{stats}");
        }
    }
}

// vim: ts=4 sw=4 expandtab
