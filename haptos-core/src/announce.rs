//! Time announcements
//!
//! Builds the patterns the dispatcher plays for the hourly chime and the
//! time buttons, honoring the configured encoding for each field. Pure
//! composition over `haptos-pattern`; playback stays with the dispatcher.

use haptos_pattern::timing::FIELD_REST_MS;
use haptos_pattern::{encode, EncodeError, EncodingScheme, HapticStep, Pattern};

use crate::config::{HourAnnounce, MinuteAnnounce, WatchConfig};
use crate::traits::ClockReading;

/// The configured hour field
pub fn hour_pattern(config: &WatchConfig, hour: u8) -> Result<Pattern, EncodeError> {
    let scheme = match config.hour_announce {
        HourAnnounce::BinaryPulse => EncodingScheme::BinaryPulse {
            bits: config.hour_bits,
            speed: config.hour_speed,
        },
        HourAnnounce::MorseDigits => EncodingScheme::MorseDigits,
    };
    encode(u16::from(hour), scheme)
}

/// The configured standalone minute field; `None` when the variant folds
/// the minute into the Back button
pub fn minute_pattern(
    config: &WatchConfig,
    minute: u8,
) -> Option<Result<Pattern, EncodeError>> {
    let scheme = match config.up_button {
        MinuteAnnounce::QuarterSplit => EncodingScheme::QuarterHourSplit,
        MinuteAnnounce::BinaryPulse => EncodingScheme::BinaryPulse {
            bits: config.minute_bits,
            speed: config.minute_speed,
        },
        MinuteAnnounce::Folded => return None,
    };
    Some(encode(u16::from(minute), scheme))
}

/// Full time: hour field, a longer rest, minute field
///
/// Both fields use the hour-announcement family so the whole message reads
/// in one notation.
pub fn time_pattern(config: &WatchConfig, clock: ClockReading) -> Result<Pattern, EncodeError> {
    let mut out = hour_pattern(config, clock.hour)?;

    out.push(HapticStep::rest(FIELD_REST_MS))
        .map_err(|_| EncodeError::Overflow)?;

    let minute_scheme = match config.hour_announce {
        HourAnnounce::BinaryPulse => EncodingScheme::BinaryPulse {
            bits: config.minute_bits,
            speed: config.minute_speed,
        },
        HourAnnounce::MorseDigits => EncodingScheme::MorseDigits,
    };
    let minute = encode(u16::from(clock.minute), minute_scheme)?;
    out.extend_from_slice(&minute)
        .map_err(|_| EncodeError::Overflow)?;
    Ok(out)
}
