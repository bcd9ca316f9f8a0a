//! Report-shaped outputs consumed by the HTTP layer.
//!
//! Rows serialize as JSON arrays, e.g. `["Thu", 23705]`.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use crate::model::{UserDirectory, UserPresence, UserSummary};
use crate::stats::{mean, sum_intervals};
use crate::weekday::{
    group_intervals_by_weekday, group_start_end_by_weekday, WEEKDAY_ABBREVIATIONS,
};

/// Mean of one weekday bucket.
///
/// A weekday with no records serializes as the integer `0`; any other mean
/// serializes as a float, so `30047` is written `30047.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BucketMean {
    Empty,
    Seconds(f64),
}

impl BucketMean {
    pub fn of(values: &[i64]) -> Self {
        if values.is_empty() {
            BucketMean::Empty
        } else {
            BucketMean::Seconds(mean(values))
        }
    }
}

impl Serialize for BucketMean {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BucketMean::Empty => serializer.serialize_u8(0),
            BucketMean::Seconds(seconds) => serializer.serialize_f64(*seconds),
        }
    }
}

/// `[weekday, mean_seconds]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayMean(pub &'static str, pub BucketMean);

/// `[weekday, mean_start_seconds, mean_end_seconds]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStartEnd(pub &'static str, pub BucketMean, pub BucketMean);

/// Rows of the total presence report: a header followed by one row per weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TotalTimeRow {
    Header(&'static str, &'static str),
    Weekday(&'static str, i64),
}

/// Rows of the weekly presence report: a header followed by worked and off hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeeklyPresenceRow {
    Header(&'static str, &'static str),
    Hours(&'static str, f64),
}

/// Orders user names in the users listing.
pub type NameComparator = fn(&str, &str) -> Ordering;

/// Plain Unicode code point order.
pub fn codepoint_order(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Users listing sorted by name with the given comparator.
///
/// The sort is stable, so users with equal names stay in id order.
pub fn users_list(directory: &UserDirectory, compare: NameComparator) -> Vec<UserSummary> {
    let mut users: Vec<UserSummary> = directory
        .iter()
        .map(|(&user_id, info)| UserSummary {
            user_id,
            name: info.name.clone(),
            avatar: info.avatar.clone(),
        })
        .collect();
    users.sort_by(|a, b| compare(&a.name, &b.name));
    users
}

/// Mean presence time per weekday.
pub fn mean_time_by_weekday(days: &UserPresence) -> Vec<WeekdayMean> {
    group_intervals_by_weekday(days)
        .iter()
        .zip(WEEKDAY_ABBREVIATIONS)
        .map(|(intervals, weekday)| WeekdayMean(weekday, BucketMean::of(intervals)))
        .collect()
}

/// Total presence time per weekday, preceded by a header row.
pub fn total_time_by_weekday(days: &UserPresence) -> Vec<TotalTimeRow> {
    let mut rows = vec![TotalTimeRow::Header("Weekday", "Presence (s)")];
    rows.extend(
        group_intervals_by_weekday(days)
            .iter()
            .zip(WEEKDAY_ABBREVIATIONS)
            .map(|(intervals, weekday)| TotalTimeRow::Weekday(weekday, intervals.iter().sum())),
    );
    rows
}

/// Mean arrival and departure time per weekday.
pub fn start_end_by_weekday(days: &UserPresence) -> Vec<WeekdayStartEnd> {
    group_start_end_by_weekday(days)
        .iter()
        .zip(WEEKDAY_ABBREVIATIONS)
        .map(|(bucket, weekday)| {
            WeekdayStartEnd(weekday, BucketMean::of(&bucket.starts), BucketMean::of(&bucket.ends))
        })
        .collect()
}

/// Worked and off hours of an average week.
pub fn weekly_mean_presence(days: &UserPresence) -> Vec<WeeklyPresenceRow> {
    let daily_means: Vec<f64> = group_intervals_by_weekday(days)
        .iter()
        .map(|intervals| mean(intervals))
        .collect();
    let (worked, off) = sum_intervals(&daily_means);
    vec![
        WeeklyPresenceRow::Header("Activity", "Total hours"),
        WeeklyPresenceRow::Hours("Worked hours", worked),
        WeeklyPresenceRow::Hours("Off hours", off),
    ]
}
