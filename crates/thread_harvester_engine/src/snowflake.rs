use chrono::{DateTime, SecondsFormat, Utc};

/// Milliseconds between the Unix epoch and the snowflake epoch (2010-11-04).
pub const EPOCH_OFFSET_MILLIS: i64 = 1_288_834_974_657;

const TIMESTAMP_SHIFT: u32 = 22;

/// Creation time in Unix milliseconds encoded in the high bits of a
/// snowflake-style item ID. Returns `None` for anything that is not an
/// unsigned 64-bit integer.
pub fn snowflake_timestamp_millis(item_id: &str) -> Option<i64> {
    let id: u64 = item_id.trim().parse().ok()?;
    let since_epoch = i64::try_from(id >> TIMESTAMP_SHIFT).ok()?;
    since_epoch.checked_add(EPOCH_OFFSET_MILLIS)
}

pub fn snowflake_created_at(item_id: &str) -> Option<DateTime<Utc>> {
    snowflake_timestamp_millis(item_id).and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// RFC 3339 UTC rendering with millisecond precision, e.g. `2023-09-13T13:18:03.612Z`.
pub fn created_time_iso(item_id: &str) -> Option<String> {
    snowflake_created_at(item_id).map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
