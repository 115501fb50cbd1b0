//! Boot melody
//!
//! A short fixed flourish played once on power-on reset, driving the motor
//! at per-note PWM frequencies so it doubles as a crude speaker. Unlike
//! every other pattern this carries no information; callers must never use
//! it as a status signal.

use crate::scheme::EncodeError;
use crate::step::{push, HapticStep, Pattern};
use crate::timing::MELODY_INTENSITY;

/// One melody note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// PWM carrier frequency; 0 is a silent rest
    pub frequency_hz: u16,
    /// Base duration before the dotted extension
    pub duration_ms: u16,
    /// Dotted notes play half again as long
    pub dotted: bool,
}

impl Note {
    pub const fn plain(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            dotted: false,
        }
    }

    pub const fn dotted(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            dotted: true,
        }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self {
            frequency_hz: 0,
            duration_ms,
            dotted: false,
        }
    }

    /// Duration with the dotted extension applied
    pub const fn effective_ms(&self) -> u16 {
        if self.dotted {
            self.duration_ms + self.duration_ms / 2
        } else {
            self.duration_ms
        }
    }
}

// Note frequencies, transposed up two octaves: the motor barely responds
// below ~500 Hz.
const DS5: u16 = 622;
const FS5: u16 = 740;
const G5: u16 = 784;
const AS5: u16 = 932;
const D6: u16 = 1175;
const DS6: u16 = 1245;

const QUARTER_MS: u16 = 500;
const EIGHTH_MS: u16 = 250;
const HALF_MS: u16 = 1000;

/// The power-on flourish
pub const BOOT_MELODY: [Note; 18] = [
    // Opening phrase
    Note::plain(G5, QUARTER_MS),
    Note::plain(G5, QUARTER_MS),
    Note::plain(G5, QUARTER_MS),
    Note::plain(DS5, EIGHTH_MS),
    Note::plain(AS5, EIGHTH_MS),
    // Continuation
    Note::plain(G5, QUARTER_MS),
    Note::plain(DS5, EIGHTH_MS),
    Note::plain(AS5, EIGHTH_MS),
    Note::plain(G5, HALF_MS),
    // Higher phrase
    Note::plain(D6, QUARTER_MS),
    Note::plain(D6, QUARTER_MS),
    Note::plain(D6, QUARTER_MS),
    Note::plain(DS6, EIGHTH_MS),
    Note::plain(AS5, EIGHTH_MS),
    // Resolution
    Note::plain(FS5, QUARTER_MS),
    Note::plain(DS5, EIGHTH_MS),
    Note::plain(AS5, EIGHTH_MS),
    Note::plain(G5, HALF_MS),
];

/// Render a note table into motor steps
///
/// Each note drives at low intensity for 90% of its effective duration and
/// rests for the remainder; zero-frequency notes become pure rests.
pub fn render_melody(notes: &[Note]) -> Result<Pattern, EncodeError> {
    let mut out = Pattern::new();
    for note in notes {
        let total = note.effective_ms();
        if note.frequency_hz == 0 {
            push(&mut out, HapticStep::rest(total))?;
            continue;
        }
        let sounding = total - total / 10;
        push(
            &mut out,
            HapticStep::pitched(MELODY_INTENSITY, sounding, note.frequency_hz),
        )?;
        push(&mut out, HapticStep::rest(total - sounding))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_extends_by_half() {
        assert_eq!(Note::dotted(440, 500).effective_ms(), 750);
        assert_eq!(Note::plain(440, 500).effective_ms(), 500);
    }

    #[test]
    fn test_note_splits_ninety_ten() {
        let pattern = render_melody(&[Note::plain(784, 500)]).unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern[0].duration_ms, 450);
        assert_eq!(pattern[0].intensity, MELODY_INTENSITY);
        assert_eq!(pattern[0].frequency_hz, Some(784));
        assert_eq!(pattern[1].duration_ms, 50);
        assert!(pattern[1].is_rest());
    }

    #[test]
    fn test_zero_frequency_is_a_rest() {
        let pattern = render_melody(&[Note::rest(300)]).unwrap();
        assert_eq!(pattern.len(), 1);
        assert!(pattern[0].is_rest());
        assert_eq!(pattern[0].duration_ms, 300);
    }

    #[test]
    fn test_boot_melody_fits_and_sounds() {
        let pattern = render_melody(&BOOT_MELODY).unwrap();
        assert_eq!(pattern.len(), BOOT_MELODY.len() * 2);
        assert!(pattern.iter().all(|s| s.intensity <= MELODY_INTENSITY));
    }
}
