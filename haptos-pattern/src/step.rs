//! Motor steps and bounded pattern buffers
//!
//! A pattern is an ordered list of steps. The play primitive consumes it
//! strictly front to back; encoders only ever append.

use heapless::Vec;

use crate::scheme::EncodeError;

/// Maximum steps in one pattern
///
/// Sized for the worst case, a four-digit Morse time announcement
/// (4 × 11 steps plus the field rest).
pub const MAX_PATTERN_STEPS: usize = 64;

/// An encoded haptic sequence
pub type Pattern = Vec<HapticStep, MAX_PATTERN_STEPS>;

/// A single motor command: hold `intensity` for `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HapticStep {
    /// Motor drive strength (0 = off)
    pub intensity: u8,
    /// How long to hold this intensity
    pub duration_ms: u16,
    /// PWM carrier frequency for this step, if it differs from the default
    pub frequency_hz: Option<u16>,
}

impl HapticStep {
    /// A pulse at the default carrier frequency
    pub const fn drive(intensity: u8, duration_ms: u16) -> Self {
        Self {
            intensity,
            duration_ms,
            frequency_hz: None,
        }
    }

    /// Motor off for `duration_ms`
    pub const fn rest(duration_ms: u16) -> Self {
        Self {
            intensity: 0,
            duration_ms,
            frequency_hz: None,
        }
    }

    /// A pulse at an explicit carrier frequency
    pub const fn pitched(intensity: u8, duration_ms: u16, frequency_hz: u16) -> Self {
        Self {
            intensity,
            duration_ms,
            frequency_hz: Some(frequency_hz),
        }
    }

    /// True when the motor is off during this step
    pub const fn is_rest(&self) -> bool {
        self.intensity == 0
    }
}

/// Append one step, mapping a full buffer to [`EncodeError::Overflow`]
pub(crate) fn push(pattern: &mut Pattern, step: HapticStep) -> Result<(), EncodeError> {
    pattern.push(step).map_err(|_| EncodeError::Overflow)
}
