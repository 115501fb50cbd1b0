//! GPIO button bank
//!
//! Maps the four logical buttons onto GPIO lines. The wake controller only
//! ever asks "is this line asserted"; edge detection belongs to the wake
//! hardware, not to this driver.

use embedded_hal::digital::InputPin;
use haptos_core::traits::{Button, ButtonInput};

/// Four buttons behind GPIO lines, indexed by [`Button::index`]
///
/// `active_low` covers boards that wire the buttons against pull-ups.
pub struct GpioButtons<P> {
    pins: [P; 4],
    active_low: bool,
}

impl<P: InputPin> GpioButtons<P> {
    /// Buttons that read high when pressed
    pub fn active_high(pins: [P; 4]) -> Self {
        Self {
            pins,
            active_low: false,
        }
    }

    /// Buttons that read low when pressed (pull-up wiring)
    pub fn active_low(pins: [P; 4]) -> Self {
        Self {
            pins,
            active_low: true,
        }
    }

    /// Mask of every currently asserted button, for wake classification
    pub fn pressed_mask(&mut self) -> u8 {
        let mut mask = 0;
        for button in [Button::Menu, Button::Back, Button::Up, Button::Down] {
            if self.is_pressed(button) {
                mask |= button.mask();
            }
        }
        mask
    }
}

impl<P: InputPin> ButtonInput for GpioButtons<P> {
    fn is_pressed(&mut self, button: Button) -> bool {
        let level = self.pins[button.index()].is_high().unwrap_or(false);
        level != self.active_low
    }
}
