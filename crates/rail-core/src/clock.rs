//! Schedule timestamp parsing and minute arithmetic.
//!
//! Schedule files carry wall-clock timestamps as plain strings.  The
//! canonical form is `%Y-%m-%d %H:%M:%S`; an ISO-8601 `T` separator is
//! accepted as a fallback.  A timestamp that parses under neither format is
//! not an error; the owning train simply has no computable ETA and drops
//! out of conflict projection.

use chrono::NaiveDateTime;

const SCHEDULE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a schedule timestamp, trying each accepted format in order.
pub fn parse_schedule_time(raw: &str) -> Option<NaiveDateTime> {
    SCHEDULE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
}

/// Signed minutes from `earlier` to `later` (negative if `later` precedes).
#[inline]
pub fn minutes_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    (later - earlier).num_seconds() as f64 / 60.0
}
