//! Time utilities: epoch millis ↔ local date-times, formatting.

use chrono::{DateTime, Local, TimeZone};

pub const DEFAULT_TIME_FORMAT: &str = "%a %d %b %Y %H:%M";

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Format epoch millis in local time; falls back to the raw number when
/// the value is not representable.
pub fn format_millis(ms: i64, fmt: &str) -> String {
    match to_local(ms) {
        Some(dt) => dt.format(fmt).to_string(),
        None => ms.to_string(),
    }
}
