//! Binary pulse encoding
//!
//! Values are emitted most-significant-bit first: a 1 bit is a long pulse,
//! a 0 bit a short pulse, every pulse followed by a fixed rest. Zero is not
//! suppressed; `binary_pulse(0, bits, _)` still emits `bits` short pulses,
//! so the wearer can always count the field width.

use crate::scheme::EncodeError;
use crate::step::{push, HapticStep, Pattern};
use crate::timing::{
    ELEMENT_REST_MS, FIELD_REST_MS, LONG_PULSE_MS, PULSE_INTENSITY, SHORT_PULSE_MS,
};

/// Widest supported binary field
pub const MAX_BITS: u8 = 8;

/// Encode `value` as `bits` pulses, MSB first
///
/// `speed` is a uniform multiplier (>= 1, clamped) on both pulse and rest
/// durations; slower fields are easier to count by feel.
pub fn binary_pulse(value: u16, bits: u8, speed: u8) -> Result<Pattern, EncodeError> {
    if bits == 0 || bits > MAX_BITS {
        return Err(EncodeError::BitsOutOfRange);
    }
    if u32::from(value) >= 1u32 << bits {
        return Err(EncodeError::ValueOutOfRange);
    }

    let speed = u16::from(speed.max(1));
    let mut out = Pattern::new();
    for bit in (0..bits).rev() {
        let one = (value >> bit) & 1 == 1;
        let pulse = if one { LONG_PULSE_MS } else { SHORT_PULSE_MS };
        push(&mut out, HapticStep::drive(PULSE_INTENSITY, pulse * speed))?;
        push(&mut out, HapticStep::rest(ELEMENT_REST_MS * speed))?;
    }
    Ok(out)
}

/// Encode a minute (0-59) as a 2-bit quarter field plus a 4-bit offset field
///
/// A raw 6-bit minute is hard to count by feel; the coarse quarter-hour cue
/// plus a short fine offset keeps the perceptual load down. The fields are
/// separated by an extra rest on top of the trailing element rest.
pub fn quarter_hour_split(minute: u8) -> Result<Pattern, EncodeError> {
    if minute > 59 {
        return Err(EncodeError::ValueOutOfRange);
    }

    let quarter = minute / 15;
    let offset = minute % 15;

    let mut out = binary_pulse(u16::from(quarter), 2, 1)?;
    push(&mut out, HapticStep::rest(FIELD_REST_MS))?;
    let tail = binary_pulse(u16::from(offset), 4, 1)?;
    out.extend_from_slice(&tail)
        .map_err(|_| EncodeError::Overflow)?;
    Ok(out)
}

/// Reconstruct the value a binary-pulse pattern encodes
///
/// Classifies every drive step by duration at the given `speed`; rests are
/// skipped. Returns `(value, bits)`, or `None` if a pulse is neither a
/// short nor a long element or the field is empty or too wide.
pub fn decode_binary(steps: &[HapticStep], speed: u8) -> Option<(u16, u8)> {
    let speed = u16::from(speed.max(1));
    let short = SHORT_PULSE_MS * speed;
    let long = LONG_PULSE_MS * speed;

    let mut value: u16 = 0;
    let mut bits: u8 = 0;
    for step in steps.iter().filter(|s| !s.is_rest()) {
        let bit = match step.duration_ms {
            d if d == long => 1,
            d if d == short => 0,
            _ => return None,
        };
        if bits == MAX_BITS {
            return None;
        }
        value = (value << 1) | bit;
        bits += 1;
    }

    if bits == 0 {
        None
    } else {
        Some((value, bits))
    }
}
