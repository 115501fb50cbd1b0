//! PWM vibration motor
//!
//! The motor the watch actually ships with: intensity maps to PWM duty and
//! the carrier frequency is programmable, which is what lets the melody
//! and the pitched countdown tick work. embedded-hal 1.0 has no trait for
//! a frequency-programmable channel, so the minimal one lives here and
//! board crates adapt their timer peripheral to it.

use haptos_core::traits::HapticActuator;

/// A PWM channel with adjustable duty and carrier frequency
pub trait PwmChannel {
    /// Set the duty cycle, 0 (off) to 255 (full drive)
    fn set_duty(&mut self, duty: u8);

    /// Set the carrier frequency
    fn set_frequency_hz(&mut self, hz: u16);
}

/// Vibration motor on a PWM channel
pub struct PwmMotor<C> {
    channel: C,
}

impl<C: PwmChannel> PwmMotor<C> {
    /// The channel starts at zero duty
    pub fn new(mut channel: C) -> Self {
        channel.set_duty(0);
        Self { channel }
    }
}

impl<C: PwmChannel> HapticActuator for PwmMotor<C> {
    fn set_intensity(&mut self, intensity: u8) {
        self.channel.set_duty(intensity);
    }

    fn set_frequency(&mut self, hz: u16) {
        self.channel.set_frequency_hz(hz);
    }
}
