//! Vibration motor drivers

pub mod gpio;
pub mod pwm;

pub use gpio::GpioMotor;
pub use pwm::{PwmChannel, PwmMotor};
