//! Attendance log loader.
//!
//! The log is a comma separated file with rows of
//! `user_id,YYYY-MM-DD,HH:MM:SS,HH:MM:SS`. Header and footer lines are
//! expected; any row that is not a well-formed record is skipped.

use std::io;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Timelike};
use presence_core::{DataSourceError, PresenceRecord, PresenceTable, RowError, UserId};

const FIELD_COUNT: usize = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Loads the attendance log at `path` into a fresh table.
///
/// Fails only when the file cannot be opened. Malformed rows are logged at
/// debug level and skipped.
pub fn load_presence(path: impl AsRef<Path>) -> Result<PresenceTable, DataSourceError> {
    let path = path.as_ref();
    let reader = csv_reader()
        .from_path(path)
        .map_err(|e| DataSourceError::new(path, e))?;
    let table = collect_records(reader);
    tracing::debug!(
        path = %path.display(),
        users = table.len(),
        days = table.day_count(),
        "Loaded presence data"
    );
    Ok(table)
}

/// Reads attendance rows from any reader. Used for in-memory sources.
pub fn read_presence<R: io::Read>(source: R) -> PresenceTable {
    collect_records(csv_reader().from_reader(source))
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

fn collect_records<R: io::Read>(mut reader: csv::Reader<R>) -> PresenceTable {
    let mut table = PresenceTable::new();
    let mut skipped = 0usize;

    for (index, row) in reader.records().enumerate() {
        let parsed = row
            .map_err(|e| RowError::Unreadable {
                reason: e.to_string(),
            })
            .and_then(|record| parse_record(&record));

        match parsed {
            Ok(record) => table.insert(record),
            // Header and footer lines carry a different number of fields.
            Err(RowError::FieldCount { .. }) => skipped += 1,
            Err(error) => {
                skipped += 1;
                tracing::debug!(line = index + 1, %error, "Problem with line");
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Skipped non-data rows");
    }
    table
}

/// Parses one row into a record. All four fields must be valid.
pub fn parse_record(row: &csv::StringRecord) -> Result<PresenceRecord, RowError> {
    if row.len() != FIELD_COUNT {
        return Err(RowError::FieldCount { found: row.len() });
    }

    let user_id = row[0]
        .parse::<UserId>()
        .map_err(|_| RowError::UserId {
            value: row[0].to_string(),
        })?;
    let date = NaiveDate::parse_from_str(&row[1], DATE_FORMAT).map_err(|_| RowError::Date {
        value: row[1].to_string(),
    })?;
    let start = parse_time(&row[2], "start")?;
    let end = parse_time(&row[3], "end")?;

    Ok(PresenceRecord {
        user_id,
        date,
        start,
        end,
    })
}

/// Parses `HH:MM:SS`. Second `60` is rejected: chrono reads it as a leap
/// second, which is not a valid wall-clock time in the log.
fn parse_time(value: &str, field: &'static str) -> Result<NaiveTime, RowError> {
    let invalid = || RowError::Time {
        field,
        value: value.to_string(),
    };
    let time = NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| invalid())?;
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_read_presence_skips_header_and_footer() {
        let data = "\
user_id,date,start,end
10,2013-09-10,09:39:05,17:59:52
10,2013-09-12,10:48:46,17:23:51
11,2013-09-09,09:12:14,15:54:17
-- end of report --
";
        let table = read_presence(data.as_bytes());
        assert_eq!(table.len(), 2);
        assert_eq!(table.day_count(), 3);

        let day = table.user(10).unwrap()[&date(2013, 9, 10)];
        assert_eq!(day.start, NaiveTime::from_hms_opt(9, 39, 5).unwrap());
        assert_eq!(day.end, NaiveTime::from_hms_opt(17, 59, 52).unwrap());
    }

    #[test]
    fn test_malformed_rows_contribute_nothing() {
        let data = "\
abc,2013-09-10,09:00:00,17:00:00
12,2013-13-45,09:00:00,17:00:00
13,2013-09-10,9am,17:00:00
14,2013-09-10,09:00:00,
15,2013-09-10,09:00:00,17:00:00,extra
16,2013-09-10
10,2013-09-10,09:00:00,17:00:00
";
        let table = read_presence(data.as_bytes());
        assert_eq!(table.user_ids().collect::<Vec<_>>(), vec![10]);
        assert_eq!(table.day_count(), 1);
    }

    #[test]
    fn test_repeated_date_last_row_wins() {
        let data = "\
10,2013-09-10,09:00:00,17:00:00
10,2013-09-10,08:00:00,16:00:00
";
        let table = read_presence(data.as_bytes());
        let day = table.user(10).unwrap()[&date(2013, 9, 10)];
        assert_eq!(day.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_end_before_start_is_kept() {
        let table = read_presence("10,2013-09-10,17:00:00,09:00:00\n".as_bytes());
        let day = table.user(10).unwrap()[&date(2013, 9, 10)];
        assert!(day.end < day.start);
    }

    #[test]
    fn test_parse_record_errors() {
        let row = csv::StringRecord::from(vec!["x", "2013-09-10", "09:00:00", "17:00:00"]);
        assert!(matches!(parse_record(&row), Err(RowError::UserId { .. })));

        let row = csv::StringRecord::from(vec!["10", "2013-09-10", "09:00:00", "25:00:00"]);
        assert!(matches!(
            parse_record(&row),
            Err(RowError::Time { field: "end", .. })
        ));

        let row = csv::StringRecord::from(vec!["10", "2013-09-10"]);
        assert_eq!(parse_record(&row), Err(RowError::FieldCount { found: 2 }));
    }

    #[test]
    fn test_leap_second_row_contributes_nothing() {
        let table = read_presence("10,2013-09-10,09:00:00,23:59:60\n".as_bytes());
        assert!(table.is_empty());

        let row = csv::StringRecord::from(vec!["10", "2013-09-10", "08:59:60", "17:00:00"]);
        assert!(matches!(
            parse_record(&row),
            Err(RowError::Time { field: "start", .. })
        ));
    }

    #[test]
    fn test_load_presence_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = load_presence(&missing).unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[test]
    fn test_load_presence_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user_id,date,start,end").unwrap();
        writeln!(file, "10,2013-09-10,09:39:05,17:59:52").unwrap();
        file.flush().unwrap();

        let table = load_presence(file.path()).unwrap();
        assert!(table.contains_user(10));
    }

    #[test]
    fn test_empty_file_loads_empty_table() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let table = load_presence(file.path()).unwrap();
        assert!(table.is_empty());
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    const MALFORMED_LINES: [&str; 9] = [
        "user_id,date,start,end",
        "-- end of report --",
        "abc,2013-09-10,09:00:00,17:00:00",
        "10,2013-02-30,09:00:00,17:00:00",
        "10,2013-09-10,24:00:00,17:00:00",
        "10,2013-09-10,09:00:00,23:59:60",
        "10,2013-09-10,09:00:00",
        "10,2013-09-10,09:00:00,17:00:00,extra",
        "-1,2013-09-10,09:00:00,17:00:00",
    ];

    #[derive(Debug, Clone)]
    enum Line {
        Record(PresenceRecord),
        Malformed(&'static str),
    }

    impl Line {
        fn render(&self) -> String {
            match self {
                Line::Record(record) => format!(
                    "{},{},{},{}",
                    record.user_id,
                    record.date.format(DATE_FORMAT),
                    record.start.format(TIME_FORMAT),
                    record.end.format(TIME_FORMAT)
                ),
                Line::Malformed(line) => line.to_string(),
            }
        }
    }

    fn arb_time() -> impl Strategy<Value = NaiveTime> {
        (0u32..86_400).prop_map(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap())
    }

    fn arb_record() -> impl Strategy<Value = PresenceRecord> {
        // Few users and dates so that repeated (user, date) pairs are common.
        (1u32..4, 0i64..10, arb_time(), arb_time()).prop_map(|(user_id, offset, start, end)| {
            PresenceRecord {
                user_id,
                date: date(2013, 9, 2) + chrono::Duration::days(offset),
                start,
                end,
            }
        })
    }

    fn arb_line() -> impl Strategy<Value = Line> {
        prop_oneof![
            3 => arb_record().prop_map(Line::Record),
            1 => prop::sample::select(MALFORMED_LINES.to_vec()).prop_map(Line::Malformed),
        ]
    }

    proptest! {
        #[test]
        fn prop_table_holds_exactly_the_well_formed_rows(
            lines in prop::collection::vec(arb_line(), 0..40),
        ) {
            let data: String = lines.iter().map(|line| line.render() + "\n").collect();
            let expected: PresenceTable = lines
                .iter()
                .filter_map(|line| match line {
                    Line::Record(record) => Some(*record),
                    Line::Malformed(_) => None,
                })
                .collect();

            prop_assert_eq!(read_presence(data.as_bytes()), expected);
        }
    }
}
