//! Wake configuration and power-down contract

/// Re-arming the wake sources and entering the lowest-power state
///
/// Both arm calls are mandatory on every exit path; a transaction that
/// powers down without them leaves a device that never wakes again.
pub trait SleepControl {
    /// Level-triggered wake on the RTC alarm line
    fn arm_rtc_wake(&mut self);

    /// Any-high wake on the given button line mask
    fn arm_button_wake(&mut self, mask: u8);

    /// Power down
    ///
    /// On hardware this never returns; it is modeled as a plain call so
    /// test doubles can record it. Every transaction side effect must be
    /// committed before this is invoked.
    fn enter_lowest_power(&mut self);
}
