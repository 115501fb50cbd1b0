//! Power-down-surviving byte storage
//!
//! On the real device this is the RTC controller's retained RAM; the
//! contents survive the main logic powering down but not necessarily a
//! cold start, which is why everything stored through it carries a magic
//! and version.

/// Errors from the retention store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// The record does not fit the retained region
    Capacity,
    /// The backing memory could not be read or written
    Io,
}

/// Raw load/save access to the retained region
pub trait RetentionStore {
    /// Copy the retained bytes into `buf`, returning how many are valid
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StoreError>;

    /// Replace the retained bytes
    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError>;
}
