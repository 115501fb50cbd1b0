//! Vibration motor and delay contracts

/// The vibration motor
///
/// Commands are issued in strict step order by the play primitive; the
/// implementation must not reorder them.
pub trait HapticActuator {
    /// Set the motor drive strength (0 = off)
    fn set_intensity(&mut self, intensity: u8);

    /// Set the PWM carrier frequency
    fn set_frequency(&mut self, hz: u16);
}

/// Blocking wait
///
/// The device is single-threaded with nothing to yield to; all pulse
/// timing, debouncing and polling is built on plain blocking delays.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}
