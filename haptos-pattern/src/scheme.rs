//! Encoding scheme selection
//!
//! The source hardware grew several near-duplicate announcement styles;
//! they collapse here into one caller-selected variant. The scheme is
//! always chosen explicitly, never inferred from the value.

use crate::binary::{binary_pulse, quarter_hour_split};
use crate::melody::{render_melody, BOOT_MELODY};
use crate::morse::morse_digits;
use crate::step::Pattern;

/// How a numeric value becomes motor steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodingScheme {
    /// `bits` MSB-first pulses, long pulse = 1
    BinaryPulse { bits: u8, speed: u8 },
    /// Minute split into a 2-bit quarter and a 4-bit offset
    QuarterHourSplit,
    /// Decimal digits as Morse numerals
    MorseDigits,
    /// The boot flourish; ignores the value and carries no information
    FixedMelody,
}

/// Why an encoding request was impossible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Bit width outside 1..=8
    BitsOutOfRange,
    /// Value does not fit the scheme's domain
    ValueOutOfRange,
    /// Pattern buffer exhausted
    Overflow,
}

/// Encode `value` with the chosen scheme
pub fn encode(value: u16, scheme: EncodingScheme) -> Result<Pattern, EncodeError> {
    match scheme {
        EncodingScheme::BinaryPulse { bits, speed } => binary_pulse(value, bits, speed),
        EncodingScheme::QuarterHourSplit => {
            let minute = u8::try_from(value).map_err(|_| EncodeError::ValueOutOfRange)?;
            quarter_hour_split(minute)
        }
        EncodingScheme::MorseDigits => {
            let n = u8::try_from(value).map_err(|_| EncodeError::ValueOutOfRange)?;
            morse_digits(n)
        }
        EncodingScheme::FixedMelody => render_melody(&BOOT_MELODY),
    }
}
