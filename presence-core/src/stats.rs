//! Numeric reductions over presence data.
//!
//! Everything here is pure: no clocks, no I/O, no time zones.

use chrono::{Duration, NaiveTime, Timelike};

/// Length of the reference week used to derive off-hours.
pub const WEEK_HOURS: i64 = 168;

const SECONDS_PER_DAY: i64 = 86_400;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Seconds elapsed since 00:00:00 for a wall-clock time of day.
pub fn seconds_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second())
}

/// Signed number of seconds between `start` and `end`.
///
/// Negative when `end` is earlier in the day than `start`.
pub fn interval(start: NaiveTime, end: NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}

/// Arithmetic mean of whole seconds. An empty input yields exactly `0.0`.
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i64 = values.iter().sum();
    sum as f64 / values.len() as f64
}

/// Renders a duration as `hours.minutes`.
///
/// Minutes are written after the decimal point as-is, so 1h45m is `1.45`
/// and 1h05m is `1.5`. Negative durations follow floor semantics on whole
/// days: -30m is day -1 plus 23h30m, i.e. `-1.30`.
pub fn decimal_hours(delta: Duration) -> f64 {
    let total_seconds = match delta.num_microseconds() {
        Some(micros) => micros.div_euclid(1_000_000),
        None => delta.num_seconds(),
    };
    let days = total_seconds.div_euclid(SECONDS_PER_DAY);
    let remainder = total_seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = remainder / 3600 + days * 24;
    let minutes = (remainder % 3600) / 60;
    join_hours_minutes(hours, minutes)
}

/// Parses `"{hours}.{minutes}"` as a decimal number without going through a string.
///
/// Both operands of the division are exact in `f64`, so the quotient is the
/// correctly rounded value of the decimal literal.
fn join_hours_minutes(hours: i64, minutes: i64) -> f64 {
    let scale = if minutes < 10 { 10 } else { 100 };
    let scaled = if hours < 0 {
        hours * scale - minutes
    } else {
        hours * scale + minutes
    };
    scaled as f64 / scale as f64
}

/// Splits a week into worked and off hours.
///
/// Each value is a duration in seconds (typically a per-weekday mean). The
/// sum is the worked time; the rest of the 168-hour week is off time. Both
/// are rendered with [`decimal_hours`].
pub fn sum_intervals(daily_seconds: &[f64]) -> (f64, f64) {
    let worked = daily_seconds
        .iter()
        .map(|&seconds| Duration::microseconds((seconds * MICROS_PER_SECOND).round() as i64))
        .fold(Duration::zero(), |total, day| total + day);
    let off = Duration::hours(WEEK_HOURS) - worked;
    (decimal_hours(worked), decimal_hours(off))
}
