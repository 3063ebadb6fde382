//! Display-timezone localization of upstream timestamps.
//!
//! AeroAPI reports all times in UTC. The agent-facing boards are for a
//! Japanese audience, so the known timestamp fields are rewritten into
//! a fixed UTC+9 offset before records leave the server. Localization
//! never fails a call: a value that does not parse is passed through
//! untouched.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;

/// Fixed display offset: UTC+9 (JST).
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// The timestamp fields AeroAPI puts on a flight record:
/// scheduled/estimated/actual crossed with gate-out/takeoff/landing/gate-in.
pub const TIMESTAMP_FIELDS: [&str; 12] = [
    "scheduled_out",
    "estimated_out",
    "actual_out",
    "scheduled_off",
    "estimated_off",
    "actual_off",
    "scheduled_on",
    "estimated_on",
    "actual_on",
    "scheduled_in",
    "estimated_in",
    "actual_in",
];

/// Convert a UTC timestamp string to the fixed display offset.
///
/// UTC is assumed when the input carries no offset; a trailing `Z` is
/// accepted. The result uses numeric offset notation (`+09:00`), second
/// precision. Unparseable input is returned unchanged.
pub fn localize(value: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| value.parse::<NaiveDateTime>().map(|naive| naive.and_utc()));

    let Ok(utc) = parsed else {
        return value.to_string();
    };

    match FixedOffset::east_opt(DISPLAY_OFFSET_SECS) {
        Some(offset) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%dT%H:%M:%S%:z")
            .to_string(),
        None => value.to_string(),
    }
}

/// Rewrite the known timestamp fields of each record in place.
///
/// Null fields and fields absent from a record are left alone, as is
/// anything outside [`TIMESTAMP_FIELDS`]. Record order is preserved.
pub fn localize_batch(records: &mut [Value]) {
    for record in records {
        let Some(fields) = record.as_object_mut() else {
            continue;
        };
        for name in TIMESTAMP_FIELDS {
            if let Some(value) = fields.get_mut(name) {
                if let Some(s) = value.as_str() {
                    *value = Value::String(localize(s));
                }
            }
        }
    }
}
