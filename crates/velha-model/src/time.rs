//! Wall-clock timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
///
/// Document and chat timestamps are wall-clock values because they are
/// persisted and compared across machines; monotonic clocks would not
/// survive the round trip.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
