//! Wake-cause classification
//!
//! The hardware reports a wake as an interrupt source plus, for button
//! wakes, a mask of asserted lines. Everything the handlers need to know
//! is derived here, once per wake, into a tagged cause; no handler ever
//! looks at raw bits.

use crate::traits::Button;

/// Which interrupt line ended the sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeTrigger {
    /// The RTC alarm line
    RtcAlarm,
    /// One or more button lines, with the asserted mask
    Buttons(u8),
    /// Cold start / reset; not a wake from sleep at all
    Reset,
}

/// Raw signals sampled exactly once at wake entry
///
/// The alarm flags come from read-and-clear hardware registers, so this
/// snapshot is the only look the transaction gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeSignals {
    /// Per-second countdown alarm flag
    pub tick_alarm: bool,
    /// Hourly chime alarm flag
    pub hourly_alarm: bool,
    /// Asserted button lines
    pub buttons: u8,
    /// Cold start
    pub reset: bool,
}

impl WakeSignals {
    pub const fn for_reset() -> Self {
        Self {
            tick_alarm: false,
            hourly_alarm: false,
            buttons: 0,
            reset: true,
        }
    }

    pub const fn for_alarm(tick_alarm: bool, hourly_alarm: bool) -> Self {
        Self {
            tick_alarm,
            hourly_alarm,
            buttons: 0,
            reset: false,
        }
    }

    pub const fn for_buttons(buttons: u8) -> Self {
        Self {
            tick_alarm: false,
            hourly_alarm: false,
            buttons,
            reset: false,
        }
    }
}

/// Why the device woke
///
/// Derived once per wake; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeCause {
    /// Per-second alarm while a countdown runs
    TimerTick,
    /// Top-of-hour chime alarm
    HourlyChime,
    ButtonMenu,
    ButtonDown,
    ButtonBack,
    ButtonUp,
    PowerOnReset,
}

/// Classify one wake
///
/// Returns `None` for a spurious wake (no alarm flag set and no button bit
/// high), which the dispatcher treats as a silent no-op. When both alarm
/// flags are set the tick wins; the dispatcher runs the chime afterwards
/// from the same snapshot. Button priority mirrors the original wiring:
/// Menu, then Down, then Back, then Up.
pub fn classify(signals: &WakeSignals) -> Option<WakeCause> {
    if signals.reset {
        return Some(WakeCause::PowerOnReset);
    }
    if signals.tick_alarm {
        return Some(WakeCause::TimerTick);
    }
    if signals.hourly_alarm {
        return Some(WakeCause::HourlyChime);
    }

    if signals.buttons & Button::Menu.mask() != 0 {
        return Some(WakeCause::ButtonMenu);
    }
    if signals.buttons & Button::Down.mask() != 0 {
        return Some(WakeCause::ButtonDown);
    }
    if signals.buttons & Button::Back.mask() != 0 {
        return Some(WakeCause::ButtonBack);
    }
    if signals.buttons & Button::Up.mask() != 0 {
        return Some(WakeCause::ButtonUp);
    }

    None
}
