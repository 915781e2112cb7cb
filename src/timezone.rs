//! Conversions between UTC and the server's configured local timezone.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
///
/// Returns `None` if `canonical_timezone` is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Convert `date_time` to the local time in `canonical_timezone`.
///
/// Unlike [get_local_offset], the offset is taken at `date_time`, so daylight
/// saving changes between then and now do not shift the result.
pub fn to_local_date_time(
    date_time: OffsetDateTime,
    canonical_timezone: &str,
) -> Option<OffsetDateTime> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| date_time.to_offset(tz.get_offset_utc(&date_time).to_utc()))
}
