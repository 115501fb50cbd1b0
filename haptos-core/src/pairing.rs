//! Pairing session
//!
//! A bounded interactive wait, the only cancellable operation the watch
//! has. Polls the cancel button, the notification channel, and the timeout
//! on a short fixed interval; exactly one terminal pattern plays, so the
//! session never exits silently.

use haptos_pattern::{failure, success};

use crate::player::play;
use crate::traits::{Button, ButtonInput, Delay, HapticActuator, NotificationChannel};

/// Poll interval
pub const PAIRING_POLL_MS: u32 = 10;

/// The button that aborts the session
pub const CANCEL_BUTTON: Button = Button::Menu;

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingOutcome {
    /// A notification arrived
    Notified,
    /// The wearer pressed the cancel button
    Cancelled,
    /// The budget elapsed with nothing heard
    TimedOut,
}

/// Run one session to its terminal pattern
pub fn run<B, N, M, D>(
    buttons: &mut B,
    notifications: &mut N,
    motor: &mut M,
    delay: &mut D,
    timeout_ms: u32,
) -> PairingOutcome
where
    B: ButtonInput,
    N: NotificationChannel,
    M: HapticActuator,
    D: Delay,
{
    let mut elapsed_ms: u32 = 0;
    loop {
        if buttons.is_pressed(CANCEL_BUTTON) {
            play(motor, delay, &failure());
            return PairingOutcome::Cancelled;
        }
        if notifications.has_notification() {
            play(motor, delay, &success());
            return PairingOutcome::Notified;
        }
        if elapsed_ms >= timeout_ms {
            play(motor, delay, &failure());
            return PairingOutcome::TimedOut;
        }

        delay.delay_ms(PAIRING_POLL_MS);
        elapsed_ms += PAIRING_POLL_MS;
    }
}
