//! Plain GPIO vibration motor
//!
//! For boards that drive the motor through a bare transistor: any non-zero
//! intensity is "on". Frequency commands have nowhere to go and are
//! dropped; patterns still render, just without pitch.

use embedded_hal::digital::OutputPin;
use haptos_core::traits::HapticActuator;

/// On/off vibration motor behind a single GPIO line
pub struct GpioMotor<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> GpioMotor<P> {
    /// The pin starts driven low (motor off)
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, on: false }
    }

    /// Current logical state
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<P: OutputPin> HapticActuator for GpioMotor<P> {
    fn set_intensity(&mut self, intensity: u8) {
        self.on = intensity > 0;
        if self.on {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }

    fn set_frequency(&mut self, _hz: u16) {
        // No carrier on a bare GPIO line
    }
}
