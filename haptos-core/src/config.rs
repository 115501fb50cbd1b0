//! Watch configuration
//!
//! The source hardware existed in several near-duplicate builds that
//! disagreed on announcement details; those disagreements are knobs here
//! instead of forks of the dispatcher.

use serde::{Deserialize, Serialize};

/// How the hourly chime and hour fields are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourAnnounce {
    /// Binary pulse train, MSB first
    #[default]
    BinaryPulse,
    /// Morse numerals
    MorseDigits,
}

/// What the Back button announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackAnnounce {
    /// Hour field, a longer rest, then the minute field
    #[default]
    FullTime,
    /// Hour alone
    HourOnly,
}

/// What the Up button announces while no countdown is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MinuteAnnounce {
    /// 2-bit quarter plus 4-bit offset
    #[default]
    QuarterSplit,
    /// Plain binary minute
    BinaryPulse,
    /// Nothing distinct; the time lives on the Back button
    Folded,
}

/// Reasons a configuration is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A binary field width is outside 1..=8
    BitWidth,
    /// A speed multiplier is zero
    Speed,
    /// The resync hour is not a valid hour of day
    ResyncHour,
}

/// All behavior knobs in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchConfig {
    /// Hour encoding for the chime and time announcements
    pub hour_announce: HourAnnounce,
    /// Back button behavior
    pub back_button: BackAnnounce,
    /// Up button behavior while idle
    pub up_button: MinuteAnnounce,
    /// Re-run network sync when the chime lands on this hour
    pub resync_hour: Option<u8>,
    /// Pairing session budget
    pub pairing_timeout_ms: u32,
    /// Down button countdown increment (seconds)
    pub short_extend_s: u32,
    /// Up button countdown increment (seconds)
    pub long_extend_s: u32,
    /// Binary field width for hours
    pub hour_bits: u8,
    /// Binary field width for minutes
    pub minute_bits: u8,
    /// Speed multiplier for hour fields; hours run slower so the longer
    /// field stays countable
    pub hour_speed: u8,
    /// Speed multiplier for minute fields
    pub minute_speed: u8,
    /// Pitch the countdown tick by remaining time
    pub tick_pitch: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            hour_announce: HourAnnounce::default(),
            back_button: BackAnnounce::default(),
            up_button: MinuteAnnounce::default(),
            resync_hour: None,
            pairing_timeout_ms: 30_000,
            short_extend_s: 60,
            long_extend_s: 300,
            hour_bits: 5,
            minute_bits: 6,
            hour_speed: 2,
            minute_speed: 1,
            tick_pitch: true,
        }
    }
}

impl WatchConfig {
    /// Reject configurations the encoder cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.hour_bits) || !(1..=8).contains(&self.minute_bits) {
            return Err(ConfigError::BitWidth);
        }
        if self.hour_speed == 0 || self.minute_speed == 0 {
            return Err(ConfigError::Speed);
        }
        if let Some(hour) = self.resync_hour {
            if hour > 23 {
                return Err(ConfigError::ResyncHour);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(WatchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = WatchConfig {
            hour_speed: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Speed));
    }

    #[test]
    fn test_rejects_wide_fields() {
        let config = WatchConfig {
            minute_bits: 9,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BitWidth));
    }

    #[test]
    fn test_rejects_impossible_resync_hour() {
        let config = WatchConfig {
            resync_hour: Some(24),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ResyncHour));
    }
}
