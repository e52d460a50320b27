//! Clock port for stamping task creation times.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Tests substitute a replayed clock so `createdAt` values are fixed.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
