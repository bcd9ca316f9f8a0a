//! Presence Core - Data Types and Statistics
//!
//! Pure data structures and reductions with no I/O. Every other crate in the
//! workspace depends on this one.
//!
//! - [`model`]: presence records, the per-user table, user directory entries
//! - [`stats`]: seconds since midnight, intervals, means, weekly hour split
//! - [`weekday`]: Monday-first weekday bucketing
//! - [`report`]: report rows as served by the HTTP layer

pub mod error;
pub mod model;
pub mod report;
pub mod stats;
pub mod weekday;

pub use error::{DataSourceError, PresenceError, PresenceResult, RowError, UserDirectoryError};
pub use model::{
    PresenceRecord, PresenceTable, UserDirectory, UserId, UserInfo, UserPresence, UserSummary,
    WorkDay,
};
pub use report::{
    codepoint_order, mean_time_by_weekday, start_end_by_weekday, total_time_by_weekday,
    users_list, weekly_mean_presence, BucketMean, NameComparator, TotalTimeRow, WeekdayMean,
    WeekdayStartEnd, WeeklyPresenceRow,
};
pub use stats::{decimal_hours, interval, mean, seconds_since_midnight, sum_intervals};
pub use weekday::{
    group_intervals_by_weekday, group_start_end_by_weekday, weekday_index, StartEndBucket,
    WeekdayBuckets, DAYS_IN_WEEK, WEEKDAY_ABBREVIATIONS,
};

/// Timestamp in milliseconds since the Unix epoch.
pub type TimestampMs = i64;
