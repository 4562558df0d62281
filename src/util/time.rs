//! Relative timestamps for post and notification lists.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

fn ago(n: i64, unit: &str) -> String {
    let suffix = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{suffix} ago")
}

/// Human label for `then` as seen at `now`.
///
/// Under a minute (or in the future) reads "just now"; a week or more falls
/// back to the calendar date `M/D/YYYY` in `then`'s offset.
pub fn format_relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - then).whole_seconds();
    if secs < MINUTE {
        "just now".to_owned()
    } else if secs < HOUR {
        ago(secs / MINUTE, "minute")
    } else if secs < DAY {
        ago(secs / HOUR, "hour")
    } else if secs < WEEK {
        ago(secs / DAY, "day")
    } else {
        format!("{}/{}/{}", u8::from(then.month()), then.day(), then.year())
    }
}

/// Parse an RFC 3339 timestamp and label it relative to `now`, showing
/// calendar dates in `local` time.
pub fn format_timestamp(raw: &str, now: OffsetDateTime, local: UtcOffset) -> Option<String> {
    let then = OffsetDateTime::parse(raw, &Rfc3339).ok()?;
    Some(format_relative_time(then.to_offset(local), now))
}

/// [`format_timestamp`] against the browser clock and time zone.
#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
pub fn format_timestamp_now(raw: &str) -> Option<String> {
    let date = js_sys::Date::new_0();
    let now = OffsetDateTime::from_unix_timestamp_nanos(date.get_time() as i128 * 1_000_000).ok()?;
    // getTimezoneOffset is minutes *behind* UTC.
    let local = UtcOffset::from_whole_seconds(-(date.get_timezone_offset() as i32) * 60).unwrap_or(UtcOffset::UTC);
    format_timestamp(raw, now, local)
}
