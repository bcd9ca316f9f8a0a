//! Weekday bucketing of a single user's presence.
//!
//! Bucket `0` is Monday and bucket `6` is Sunday. Values inside a bucket
//! follow the iteration order of the input, which for [`UserPresence`] is
//! chronological.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::UserPresence;
use crate::stats::{interval, seconds_since_midnight};

pub const DAYS_IN_WEEK: usize = 7;

/// Abbreviated English weekday names, Monday first.
pub const WEEKDAY_ABBREVIATIONS: [&str; DAYS_IN_WEEK] =
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Seven buckets of values, one per weekday.
pub type WeekdayBuckets<T> = [T; DAYS_IN_WEEK];

/// Arrivals and departures observed on one weekday, in seconds since midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartEndBucket {
    pub starts: Vec<i64>,
    pub ends: Vec<i64>,
}

impl StartEndBucket {
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty() && self.ends.is_empty()
    }
}

/// Bucket index of a date: Monday is 0.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Groups presence intervals (in seconds) by weekday.
pub fn group_intervals_by_weekday(days: &UserPresence) -> WeekdayBuckets<Vec<i64>> {
    let mut buckets: WeekdayBuckets<Vec<i64>> = Default::default();
    for (date, day) in days {
        buckets[weekday_index(*date)].push(interval(day.start, day.end));
    }
    buckets
}

/// Groups arrival and departure times by weekday, kept apart.
pub fn group_start_end_by_weekday(days: &UserPresence) -> WeekdayBuckets<StartEndBucket> {
    let mut buckets: WeekdayBuckets<StartEndBucket> = Default::default();
    for (date, day) in days {
        let bucket = &mut buckets[weekday_index(*date)];
        bucket.starts.push(seconds_since_midnight(day.start));
        bucket.ends.push(seconds_since_midnight(day.end));
    }
    buckets
}
