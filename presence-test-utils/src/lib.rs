//! Presence Analyzer Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Sample attendance log and user directory for two users
//! - A [`fixtures::Fixture`] that writes them into a temporary directory
//! - Proptest generators for per-user tables

pub use presence_core::{UserId, UserPresence, WorkDay};
pub use presence_storage::ManualClock;

// ============================================================================
// SAMPLE DATA
// ============================================================================

/// Attendance log for users 10 and 11, with a header, a footer and one
/// malformed row for user 12.
pub const SAMPLE_CSV: &str = "\
user_id,date,start,end
10,2013-09-10,09:39:05,17:59:52
10,2013-09-12,10:48:46,17:23:51
10,2013-09-11,09:19:52,16:07:37
11,2013-09-02,09:11:14,15:53:20
11,2013-09-09,09:13:14,15:55:14
11,2013-09-10,09:19:50,13:55:54
11,2013-09-11,09:13:26,16:15:27
11,2013-09-12,09:53:22,16:16:26
11,2013-09-13,13:16:56,15:04:02
12,2013-09-1x,09:00:00,17:00:00
-- end of report --
";

/// User directory matching [`SAMPLE_CSV`].
pub const SAMPLE_USERS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<intranet>
  <server>
    <host>intranet.example.com</host>
    <port>443</port>
    <protocol>https</protocol>
  </server>
  <users>
    <user id="10">
      <avatar>/api/images/users/10</avatar>
      <name>Maciej Z.</name>
    </user>
    <user id="11">
      <avatar>/api/images/users/11</avatar>
      <name>Maciej D.</name>
    </user>
  </users>
</intranet>
"#;

/// Report page names and titles written by the fixture.
pub const SAMPLE_PAGES: [(&str, &str); 4] = [
    ("presence_weekday.html", "Presence by weekday"),
    ("mean_time_weekday.html", "Presence mean time"),
    ("presence_start_end.html", "Presence start-end"),
    ("weekly_mean_presence.html", "Weekly presence"),
];

/// Returns true when `a` and `b` differ by less than `epsilon`.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Data files laid out in a temporary directory.

    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use super::{UserId, UserPresence, SAMPLE_CSV, SAMPLE_PAGES, SAMPLE_USERS_XML};

    /// Sample data files written into a fresh temporary directory.
    ///
    /// The directory is removed when the fixture is dropped.
    #[derive(Debug)]
    pub struct Fixture {
        dir: TempDir,
        csv_path: PathBuf,
        users_xml_path: PathBuf,
        pages_dir: PathBuf,
    }

    impl Fixture {
        /// Write the sample CSV, directory and report pages.
        pub fn sample() -> io::Result<Self> {
            Self::with_data(SAMPLE_CSV, SAMPLE_USERS_XML)
        }

        /// Write the given CSV and directory contents plus the report pages.
        pub fn with_data(csv: &str, users_xml: &str) -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let csv_path = dir.path().join("sample_data.csv");
            let users_xml_path = dir.path().join("users.xml");
            let pages_dir = dir.path().join("pages");

            fs::write(&csv_path, csv)?;
            fs::write(&users_xml_path, users_xml)?;
            fs::create_dir(&pages_dir)?;
            for (name, title) in SAMPLE_PAGES {
                fs::write(pages_dir.join(name), page_html(title))?;
            }

            Ok(Self {
                dir,
                csv_path,
                users_xml_path,
                pages_dir,
            })
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn csv_path(&self) -> &Path {
            &self.csv_path
        }

        pub fn users_xml_path(&self) -> &Path {
            &self.users_xml_path
        }

        pub fn pages_dir(&self) -> &Path {
            &self.pages_dir
        }

        /// Replace the attendance log contents.
        pub fn rewrite_csv(&self, csv: &str) -> io::Result<()> {
            fs::write(&self.csv_path, csv)
        }

        /// Delete the attendance log so that loads fail.
        pub fn remove_csv(&self) -> io::Result<()> {
            fs::remove_file(&self.csv_path)
        }
    }

    /// Attendance log rows for one user, without header or footer.
    pub fn presence_csv(user_id: UserId, days: &UserPresence) -> String {
        days.iter()
            .map(|(date, day)| {
                format!(
                    "{},{},{},{}\n",
                    user_id,
                    date.format("%Y-%m-%d"),
                    day.start.format("%H:%M:%S"),
                    day.end.format("%H:%M:%S")
                )
            })
            .collect()
    }

    /// Minimal report page with the given title.
    pub fn page_html(title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body><h2>{title}</h2></body>\n</html>\n"
        )
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for presence data.

    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    use super::{UserId, UserPresence, WorkDay};

    /// Any whole-second time of day.
    pub fn arb_time() -> impl Strategy<Value = NaiveTime> {
        (0u32..86_400).prop_filter_map("valid time of day", |seconds| {
            NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        })
    }

    /// A date within a few years around 2013.
    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..2_000).prop_filter_map("valid date", |offset| {
            NaiveDate::from_ymd_opt(2012, 1, 1).map(|first| first + chrono::Duration::days(offset))
        })
    }

    /// A work day, possibly with `end` before `start`.
    pub fn arb_work_day() -> impl Strategy<Value = WorkDay> {
        (arb_time(), arb_time()).prop_map(|(start, end)| WorkDay::new(start, end))
    }

    pub fn arb_user_id() -> impl Strategy<Value = UserId> {
        1u32..50
    }

    /// One user's table with up to `max_days` distinct dates.
    pub fn arb_user_presence(max_days: usize) -> impl Strategy<Value = UserPresence> {
        proptest::collection::btree_map(arb_date(), arb_work_day(), 0..=max_days)
    }
}
