//! Real-time clock and alarm peripheral contracts

/// Errors from the RTC collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus-level communication failure
    Bus,
    /// The clock has not been set since losing power
    NotSet,
}

/// Time of day, read fresh at the start of any handler that needs it and
/// never cached across wakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockReading {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
}

impl ClockReading {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// The external time source
pub trait Rtc {
    /// Seconds since the epoch
    fn now_epoch(&mut self) -> Result<u32, RtcError>;

    /// Current hour and minute of day
    fn clock(&mut self) -> Result<ClockReading, RtcError>;

    /// Set the absolute time, typically after a successful network sync
    fn set_epoch(&mut self, epoch: u32) -> Result<(), RtcError>;
}

/// The two independent wake alarms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Fires every second while a countdown is running
    PerSecond,
    /// Fires at the top of every hour
    Hourly,
}

/// Alarm configuration and flag handling
///
/// The two alarms are independent flags, not mutually exclusive; a single
/// wake may carry both.
pub trait AlarmControl {
    /// Arm an alarm so it asserts the wake line
    fn arm(&mut self, alarm: Alarm);

    /// Disarm an alarm
    fn disarm(&mut self, alarm: Alarm);

    /// Read-and-clear an alarm flag; a flag observed once is not observed
    /// again within the same wake
    fn consume_flag(&mut self, alarm: Alarm) -> bool;

    /// Disable the square-wave output so the interrupt line carries alarms
    /// only
    fn disable_clock_output(&mut self);
}
