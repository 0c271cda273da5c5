// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use anyhow::{self as ah, Context as _};
use optotach_core::{Frame, FrameError, FrameSync};
use std::{io::Read as _, sync::mpsc, time::Duration};

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SerEvent {
    Frame(Frame),
    Corrupt(FrameError),
}

impl From<Result<Frame, FrameError>> for SerEvent {
    fn from(res: Result<Frame, FrameError>) -> Self {
        match res {
            Ok(frame) => SerEvent::Frame(frame),
            Err(e) => SerEvent::Corrupt(e),
        }
    }
}

/// Run raw received bytes through the frame synchronization.
pub fn decode<'a>(sync: &'a mut FrameSync, data: &'a [u8]) -> impl Iterator<Item = SerEvent> + 'a {
    data.iter().filter_map(|&b| sync.push(b)).map(SerEvent::from)
}

pub fn run_serial(port: &str, baud: u32, notify_tx: &mpsc::Sender<SerEvent>) -> ah::Result<()> {
    let mut serial = serialport::new(port, baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .flow_control(serialport::FlowControl::None)
        .stop_bits(serialport::StopBits::One)
        .timeout(Duration::from_millis(500))
        .open()
        .with_context(|| format!("Open serial port {port}"))?;

    let mut sync = FrameSync::new();
    let mut buf = [0_u8; 64];
    loop {
        let count = match serial.read(&mut buf) {
            Ok(count) => count,
            // Nothing received. The rotor might stand still.
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e).context("Serial port read"),
        };
        for event in decode(&mut sync, &buf[..count]) {
            notify_tx.send(event).context("Serial notification")?;
        }
    }
}


// vim: ts=4 sw=4 expandtab
