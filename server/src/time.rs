//! Wall-clock helpers. The wire protocol carries timestamps as
//! milliseconds since the Unix epoch, not as any particular Rust type.

use std::time::{SystemTime, UNIX_EPOCH};

/// The current time, in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_millis() as u64
}
