//! Delay bridge
//!
//! Adapts any embedded-hal `DelayNs` implementation to the core's blocking
//! `Delay` contract.

use embedded_hal::delay::DelayNs;
use haptos_core::traits::Delay;

/// Wrapper turning a HAL delay into the core's delay collaborator
pub struct HalDelay<D>(pub D);

impl<D: DelayNs> Delay for HalDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}
