//! Upcoming birthday ranking.
//!
//! Pure date arithmetic over stored birthdays. "Today" always comes from the caller
//! so the announcement job and the `/birthday upcoming` command agree on the date.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::model::birthday::{Birthday, BirthdayRecord, UpcomingBirthday};

/// Number of entries shown by `/birthday upcoming`.
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;

/// Year in which the birthday next occurs, counting today as upcoming.
///
/// # Arguments
/// - `birthday` - The stored birthday
/// - `today` - The current local date
///
/// # Returns
/// - `today.year()` when `(month, day)` is today or later this year
/// - `today.year() + 1` when it has already passed
pub fn next_occurrence_year(birthday: &Birthday, today: NaiveDate) -> i32 {
    if birthday.month_day() < (today.month(), today.day()) {
        today.year() + 1
    } else {
        today.year()
    }
}

/// Age the member turns on the next occurrence of their birthday.
///
/// Returns `None` for birthdays without a known year.
pub fn compute_age(birthday: &Birthday, today: NaiveDate) -> Option<i32> {
    birthday
        .year()
        .map(|year| next_occurrence_year(birthday, today) - year)
}

/// Selects up to `limit` upcoming birthdays.
///
/// Birthdays still ahead this year (today included) are taken first. When there are
/// fewer than `limit` of them the list is topped up with birthdays that already
/// passed, which next occur the following year. The combined list is then ordered by
/// `(month, day)` alone, so a January birthday belonging to next year is listed
/// before a December one belonging to this year.
///
/// Duplicate member IDs keep their first record.
///
/// # Arguments
/// - `records` - Every stored birthday, in any order
/// - `today` - The current local date
/// - `limit` - Maximum number of entries to return
///
/// # Returns
/// - `Vec<UpcomingBirthday>` - At most `limit` entries sorted by `(month, day)`
pub fn rank_upcoming(
    records: Vec<BirthdayRecord>,
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingBirthday> {
    let mut seen = HashSet::new();
    let mut sorted: Vec<BirthdayRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.member_id.clone()))
        .collect();
    sorted.sort_by_key(|record| record.birthday.month_day());

    let today_key = (today.month(), today.day());
    let (mut selected, passed): (Vec<_>, Vec<_>) = sorted
        .into_iter()
        .partition(|record| record.birthday.month_day() >= today_key);

    if selected.len() >= limit {
        selected.truncate(limit);
    } else {
        let remaining = limit - selected.len();
        selected.extend(passed.into_iter().take(remaining));
        selected.sort_by_key(|record| record.birthday.month_day());
    }

    selected
        .into_iter()
        .map(|record| UpcomingBirthday {
            next_occurrence_year: next_occurrence_year(&record.birthday, today),
            age: compute_age(&record.birthday, today),
            is_today: record.birthday.falls_on(today),
            member_id: record.member_id,
            birthday: record.birthday,
        })
        .collect()
}

/// Records whose birthday falls on `today`.
///
/// A 29 February birthday only matches in leap years.
pub fn todays_birthdays(records: Vec<BirthdayRecord>, today: NaiveDate) -> Vec<BirthdayRecord> {
    records
        .into_iter()
        .filter(|record| record.birthday.falls_on(today))
        .collect()
}
