//! Relative-age labels shown next to each todo.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Label `created_at` relative to `now`.
///
/// Timestamps in the future (clock skew between client and store) read as
/// `"just now"`.
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds();
    if secs < MINUTE {
        "just now".to_string()
    } else if secs < HOUR {
        format!("{} min ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{} hr ago", secs / HOUR)
    } else {
        format!("{} day(s) ago", secs / DAY)
    }
}
