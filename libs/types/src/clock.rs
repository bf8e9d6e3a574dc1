//! Arrival timestamps
//!
//! Same-price orders are ranked solely by arrival time, so timestamps must be
//! strictly increasing even when the wall clock stalls or two orders are
//! created within the same nanosecond.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Next arrival timestamp in Unix nanos
///
/// Follows the wall clock, but never returns a value less than or equal to
/// one already handed out in this process.
pub fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let previous = LAST_TIMESTAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}
