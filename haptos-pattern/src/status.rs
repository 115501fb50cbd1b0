//! Status patterns
//!
//! The watch's entire failure vocabulary is two shapes: a rising staircase
//! always means "success", a falling double burst always means
//! "failed / cancelled / timed out". The tick is the once-per-second
//! countdown nudge.

use crate::step::{HapticStep, Pattern};
use crate::timing::{SHORT_PULSE_MS, TICK_INTENSITY};

/// One rising staircase: unmistakably "it worked"
pub fn success() -> Pattern {
    const RAMP: [u8; 5] = [64, 64, 96, 128, 255];

    let mut out = Pattern::new();
    for intensity in RAMP {
        let _ = out.push(HapticStep::drive(intensity, 100));
    }
    out
}

/// Two short falling bursts: "failed / cancelled / timed out"
pub fn failure() -> Pattern {
    const RAMP: [u8; 5] = [255, 128, 96, 64, 32];

    let mut out = Pattern::new();
    for burst in 0..2 {
        if burst > 0 {
            let _ = out.push(HapticStep::rest(100));
        }
        for intensity in RAMP {
            let _ = out.push(HapticStep::drive(intensity, 50));
        }
    }
    out
}

/// One subtle pulse; `frequency_hz` pitches it when the caller wants to
/// convey urgency
pub fn tick(frequency_hz: Option<u16>) -> Pattern {
    let step = match frequency_hz {
        Some(hz) => HapticStep::pitched(TICK_INTENSITY, SHORT_PULSE_MS, hz),
        None => HapticStep::drive(TICK_INTENSITY, SHORT_PULSE_MS),
    };

    let mut out = Pattern::new();
    let _ = out.push(step);
    out
}
