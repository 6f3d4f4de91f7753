//! 时间工具函数 - 营业时区转换
//!
//! Reports work on `i64` Unix millis; these helpers turn venue-local dates
//! into those bounds.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike};
use chrono_tz::Tz;
use shared::Timestamp;

/// 日期 + 时分秒 → Unix millis (venue zone)
///
/// DST gap fallback: a local time that does not exist falls back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> Timestamp {
    let Some(naive) = date.and_hms_opt(hour, min, sec) else {
        return date_hms_to_millis(date, 0, 0, 0, tz);
    };
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> Timestamp {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// Last millisecond of `date` (inclusive bound)
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> Timestamp {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz) - 1
}

/// Instant in the venue zone; out-of-range millis clamp to the epoch
pub fn to_local(millis: Timestamp, tz: Tz) -> DateTime<Tz> {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
}

/// Venue-local calendar date of an instant
pub fn local_date(millis: Timestamp, tz: Tz) -> NaiveDate {
    to_local(millis, tz).date_naive()
}

/// Venue-local hour (0-23) of an instant
pub fn local_hour(millis: Timestamp, tz: Tz) -> u32 {
    to_local(millis, tz).hour()
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse an IANA zone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|e| {
        tracing::warn!("Unknown timezone '{}': {}, falling back to UTC", name, e);
        Tz::UTC
    })
}
