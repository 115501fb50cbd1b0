//! The play primitive
//!
//! The only side-effecting step in the haptic pipeline: walk an encoded
//! pattern front to back, driving the actuator and blocking for each step's
//! duration. Always leaves the motor off and the carrier back at its
//! default.

use haptos_pattern::timing::DEFAULT_FREQUENCY_HZ;
use haptos_pattern::HapticStep;

use crate::traits::{Delay, HapticActuator};

/// Play `steps` strictly in order
pub fn play<M, D>(motor: &mut M, delay: &mut D, steps: &[HapticStep])
where
    M: HapticActuator,
    D: Delay,
{
    let mut retuned = false;
    for step in steps {
        if let Some(hz) = step.frequency_hz {
            motor.set_frequency(hz);
            retuned = true;
        }
        motor.set_intensity(step.intensity);
        delay.delay_ms(u32::from(step.duration_ms));
    }

    motor.set_intensity(0);
    if retuned {
        motor.set_frequency(DEFAULT_FREQUENCY_HZ);
    }
}
