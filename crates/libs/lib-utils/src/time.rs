//! # Time Utilities
//!
//! Unix timestamps using chrono.

use chrono::Utc;

/// Current time as unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
