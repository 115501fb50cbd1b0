//! Wake classification and dispatch

pub mod cause;
pub mod dispatcher;

pub use cause::{classify, WakeCause, WakeSignals, WakeTrigger};
pub use dispatcher::WakeDispatcher;
