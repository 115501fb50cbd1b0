//! Hardware collaborator contracts
//!
//! Everything the controller touches outside its own state sits behind one
//! of these traits; board crates supply the implementations.

pub mod actuator;
pub mod buttons;
pub mod link;
pub mod power;
pub mod rtc;
pub mod store;

pub use actuator::{Delay, HapticActuator};
pub use buttons::{Button, ButtonInput};
pub use link::{NotificationChannel, SyncError, TimeSync};
pub use power::SleepControl;
pub use rtc::{Alarm, AlarmControl, ClockReading, Rtc, RtcError};
pub use store::{RetentionStore, StoreError};
