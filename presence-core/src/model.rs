//! Presence data model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Identifier of an employee in the attendance log and the user directory.
pub type UserId = u32;

/// Arrival and departure on a single day.
///
/// `end` is allowed to precede `start`; nothing downstream rejects that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkDay {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkDay {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// One row of the attendance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl PresenceRecord {
    pub fn work_day(&self) -> WorkDay {
        WorkDay::new(self.start, self.end)
    }
}

/// All recorded days of a single user, in chronological order.
pub type UserPresence = BTreeMap<NaiveDate, WorkDay>;

/// Presence data of every user, keyed by user then date.
///
/// One entry per user per date. Inserting a record for a date that is
/// already present replaces the previous entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceTable {
    users: BTreeMap<UserId, UserPresence>,
}

impl PresenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, overwriting any earlier entry for the same user and date.
    pub fn insert(&mut self, record: PresenceRecord) {
        self.users
            .entry(record.user_id)
            .or_default()
            .insert(record.date, record.work_day());
    }

    /// Presence of one user, or `None` if the user never appears in the log.
    pub fn user(&self, user_id: UserId) -> Option<&UserPresence> {
        self.users.get(&user_id)
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, UserId, UserPresence> {
        self.users.iter()
    }

    /// Number of distinct users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of (user, date) entries across all users.
    pub fn day_count(&self) -> usize {
        self.users.values().map(BTreeMap::len).sum()
    }
}

impl FromIterator<PresenceRecord> for PresenceTable {
    fn from_iter<I: IntoIterator<Item = PresenceRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

impl<'a> IntoIterator for &'a PresenceTable {
    type Item = (&'a UserId, &'a UserPresence);
    type IntoIter = btree_map::Iter<'a, UserId, UserPresence>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

/// Directory entry for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    /// Absolute avatar URL.
    pub avatar: String,
}

/// User directory keyed by user id.
pub type UserDirectory = BTreeMap<UserId, UserInfo>;

/// One entry of the users listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserSummary {
    pub user_id: UserId,
    pub name: String,
    pub avatar: String,
}
