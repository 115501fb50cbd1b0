//! Radio-side contracts: network time sync and the pairing notification
//! channel

/// Errors from the network time source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// No network available
    NoNetwork,
    /// The sync exchange timed out
    Timeout,
    /// The peer answered garbage
    Protocol,
}

/// Network time synchronization
///
/// Failure is never fatal; callers fall back to whatever the RTC says.
pub trait TimeSync {
    /// Fetch the current epoch time from the network
    fn fetch_epoch(&mut self) -> Result<u32, SyncError>;
}

/// The short-range pairing/notification channel
pub trait NotificationChannel {
    /// Non-blocking: has a notification arrived since the session opened?
    fn has_notification(&mut self) -> bool;
}
