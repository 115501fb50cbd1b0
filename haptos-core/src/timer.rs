//! Persistent countdown timer
//!
//! The deadline is the one value that must survive the device powering
//! down its main logic. It lives in the retention store as a small
//! postcard record guarded by a magic and version; anything unreadable
//! degrades to "no timer running", never to a stuck countdown.

use serde::{Deserialize, Serialize};

use crate::traits::{Alarm, AlarmControl, RetentionStore};

/// Identifies a valid timer record ("HTMR")
pub const TIMER_MAGIC: u32 = 0x4854_4D52;

/// Current record format version
pub const TIMER_RECORD_VERSION: u8 = 1;

/// Retained buffer large enough for any record encoding
pub const TIMER_RECORD_BUF: usize = 16;

/// The bytes that survive power-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Record format version
    pub version: u8,
    /// Absolute deadline in epoch seconds; 0 = inactive
    pub deadline: u32,
}

impl TimerRecord {
    pub const fn new(deadline: u32) -> Self {
        Self {
            magic: TIMER_MAGIC,
            version: TIMER_RECORD_VERSION,
            deadline,
        }
    }

    /// True when the magic and version identify a record this firmware
    /// wrote
    pub const fn is_valid(&self) -> bool {
        self.magic == TIMER_MAGIC && self.version == TIMER_RECORD_VERSION
    }
}

/// The countdown timer
///
/// Owns every read and write of the persisted deadline. All operations are
/// idempotent with respect to repeated calls with the same inputs.
pub struct CountdownTimer<S: RetentionStore> {
    store: S,
    deadline: u32,
}

impl<S: RetentionStore> CountdownTimer<S> {
    /// Restore from retained memory
    ///
    /// A short read, an I/O error, or a record with the wrong magic or
    /// version all start the timer inactive.
    pub fn restore(mut store: S) -> Self {
        let mut buf = [0u8; TIMER_RECORD_BUF];
        let deadline = match store.load(&mut buf) {
            Ok(len) => match postcard::from_bytes::<TimerRecord>(&buf[..len.min(buf.len())]) {
                Ok(record) if record.is_valid() => record.deadline,
                _ => {
                    debug!("no usable timer record, starting inactive");
                    0
                }
            },
            Err(e) => {
                warn!("retention store unreadable: {}", e);
                0
            }
        };

        Self { store, deadline }
    }

    /// Deadline != 0
    pub fn is_active(&self) -> bool {
        self.deadline != 0
    }

    /// The current absolute deadline, 0 when inactive
    pub fn deadline(&self) -> u32 {
        self.deadline
    }

    /// Boundary-inclusive: expired at the exact deadline second
    pub fn check_expired(&self, now: u32) -> bool {
        self.deadline != 0 && now >= self.deadline
    }

    /// Add to the deadline, seeding it to `now` first when inactive
    ///
    /// Seeding happens before the addition, so even a zero delta activates
    /// an inactive timer.
    pub fn extend(&mut self, now: u32, delta_s: u32) {
        if self.deadline == 0 {
            self.deadline = now;
        }
        self.deadline = self.deadline.saturating_add(delta_s);
        self.persist();
    }

    /// Arm the per-second alarm that drives the countdown
    pub fn start<A: AlarmControl>(&mut self, alarms: &mut A) {
        alarms.arm(Alarm::PerSecond);
    }

    /// Zero the deadline and disarm the per-second alarm
    pub fn stop<A: AlarmControl>(&mut self, alarms: &mut A) {
        self.deadline = 0;
        alarms.disarm(Alarm::PerSecond);
        self.persist();
    }

    fn persist(&mut self) {
        let record = TimerRecord::new(self.deadline);
        let mut buf = [0u8; TIMER_RECORD_BUF];
        match postcard::to_slice(&record, &mut buf) {
            Ok(used) => {
                if let Err(e) = self.store.save(used) {
                    warn!("deadline save failed: {}", e);
                }
            }
            Err(_) => warn!("timer record did not fit its buffer"),
        }
    }
}
