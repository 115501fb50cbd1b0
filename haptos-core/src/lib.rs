//! Board-agnostic wake-cycle controller for the Haptos wristwatch
//!
//! The watch spends its life in its lowest-power state. Everything it does
//! happens inside one bounded transaction per hardware wake: classify the
//! cause, run exactly one handler, commit the single value that survives
//! power-down, re-arm the wake sources, power back down.
//!
//! This crate holds that state machine and the subsystems it composes:
//!
//! - Hardware collaborator traits (RTC, alarms, actuator, buttons, radio,
//!   sleep control, retained memory)
//! - Wake classification and dispatch
//! - The persistent countdown timer
//! - Time announcements built on `haptos-pattern`
//! - The bounded pairing session

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod announce;
pub mod config;
pub mod pairing;
pub mod player;
pub mod timer;
pub mod traits;
pub mod wake;
