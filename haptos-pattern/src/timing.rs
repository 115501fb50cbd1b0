//! Shared pulse timing and drive levels
//!
//! Every data-bearing encoding is built from the same two pulse lengths
//! and the same rests, so patterns stay mutually countable by feel.

/// A 0 bit or a Morse dot
pub const SHORT_PULSE_MS: u16 = 50;

/// A 1 bit or a Morse dash
pub const LONG_PULSE_MS: u16 = SHORT_PULSE_MS * 3;

/// Rest after every pulse element
pub const ELEMENT_REST_MS: u16 = 120;

/// Extra rest after each completed Morse digit
pub const DIGIT_REST_MS: u16 = ELEMENT_REST_MS * 2;

/// Extra rest between the hour and minute fields of an announcement,
/// and between the quarter and offset fields of a split minute
pub const FIELD_REST_MS: u16 = ELEMENT_REST_MS * 3;

/// Drive level for data pulses
pub const PULSE_INTENSITY: u8 = 255;

/// Drive level for the once-per-second countdown tick
pub const TICK_INTENSITY: u8 = 32;

/// Drive level for melody notes; the motor doubles as a crude speaker
/// and saturates well below full drive
pub const MELODY_INTENSITY: u8 = 32;

/// Carrier frequency when no step overrides it
pub const DEFAULT_FREQUENCY_HZ: u16 = 1000;
