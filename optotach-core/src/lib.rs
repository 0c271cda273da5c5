// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Optical tachometer measurement and reporting pipeline.
//!
//! The photodiode signal is split into its slowly moving DC part
//! ([bias::DcBias]) and the fast AC part that is fed into a hysteresis
//! edge detector ([edge::EdgeDetector]).
//! Edge time stamps are converted into periods ([period::PeriodTracker])
//! and reported together with two auxiliary analog readings in a fixed
//! 8 byte serial frame ([frame::TxFrame]).
//!
//! [scheduler::Scheduler] ties everything together on top of the
//! hardware operations in [hal::Hal].

#![cfg_attr(not(test), no_std)]

pub mod bias;
pub mod edge;
pub mod frame;
pub mod hal;
pub mod period;
pub mod scheduler;
pub mod timer;

pub use crate::{
    frame::{FRAME_HEADER, FRAME_SIZE, Frame, FrameError, FrameSync},
    hal::{AdcChannel, Hal},
    scheduler::{Publish, Scheduler},
    timer::{RelTimestamp, TIMER_TICK_US, Timestamp},
};

// vim: ts=4 sw=4 expandtab
