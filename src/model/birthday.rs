//! Birthday domain models.
//!
//! A birthday either has a known year or it does not. Modelling that as a sum type
//! means an age can only ever be computed for [`Birthday::WithYear`]; there is no
//! flag to forget to check.

use chrono::{Datelike, NaiveDate};

use crate::error::birthday::BirthdayError;

/// Leap year used to store (and validate) birthdays without a known year, so that
/// 29 February is representable.
pub const PLACEHOLDER_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Birthday {
    /// Full date of birth.
    WithYear(NaiveDate),
    /// Only the month and day are known.
    WithoutYear(MonthDay),
}

/// Month and day of a birthday without a known year.
///
/// Held as the day in [`PLACEHOLDER_YEAR`], so every value names a real day. Only
/// [`Birthday::without_year`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay(NaiveDate);

impl MonthDay {
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Birthday {
    /// Parses user input in the form `YYYY-MM-DD` or `MM-DD`.
    ///
    /// # Arguments
    /// - `input` - Raw date string from the command option
    ///
    /// # Returns
    /// - `Ok(Birthday::WithYear)` - Three-part date that names a real day
    /// - `Ok(Birthday::WithoutYear)` - Two-part date valid in a leap year
    /// - `Err(BirthdayError::InvalidDate)` - Anything else
    pub fn parse(input: &str) -> Result<Self, BirthdayError> {
        let input = input.trim();
        let invalid = || BirthdayError::InvalidDate(input.to_string());

        let parts: Vec<&str> = input.split('-').collect();
        match parts.as_slice() {
            [_, _, _] => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(Birthday::WithYear)
                .map_err(|_| invalid()),
            [month, day] => {
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                let day = day.parse::<u32>().map_err(|_| invalid())?;
                Self::without_year(month, day).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }

    /// Builds a year-less birthday, returning `None` for days that never exist.
    pub fn without_year(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(PLACEHOLDER_YEAR, month, day)
            .map(|date| Birthday::WithoutYear(MonthDay(date)))
    }

    /// Rebuilds a birthday from its stored column values.
    pub fn from_stored(date: NaiveDate, has_birth_year: bool) -> Self {
        if has_birth_year {
            Birthday::WithYear(date)
        } else {
            Birthday::WithoutYear(MonthDay(
                date.with_year(PLACEHOLDER_YEAR).unwrap_or(date),
            ))
        }
    }

    /// Converts the birthday into its stored `(date, has_birth_year)` column values.
    pub fn to_stored(&self) -> (NaiveDate, bool) {
        match *self {
            Birthday::WithYear(date) => (date, true),
            Birthday::WithoutYear(month_day) => (month_day.0, false),
        }
    }

    pub fn month(&self) -> u32 {
        match self {
            Birthday::WithYear(date) => date.month(),
            Birthday::WithoutYear(month_day) => month_day.month(),
        }
    }

    pub fn day(&self) -> u32 {
        match self {
            Birthday::WithYear(date) => date.day(),
            Birthday::WithoutYear(month_day) => month_day.day(),
        }
    }

    /// Year of birth, if known.
    pub fn year(&self) -> Option<i32> {
        match self {
            Birthday::WithYear(date) => Some(date.year()),
            Birthday::WithoutYear(_) => None,
        }
    }

    pub fn has_year(&self) -> bool {
        matches!(self, Birthday::WithYear(_))
    }

    /// `(month, day)` key used for every calendar comparison.
    pub fn month_day(&self) -> (u32, u32) {
        (self.month(), self.day())
    }

    /// Whether the birthday's month and day match `date`.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.month_day() == (date.month(), date.day())
    }
}

/// A member's stored birthday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    /// Discord user ID as stored, treated as an opaque key.
    pub member_id: String,
    pub birthday: Birthday,
}

impl BirthdayRecord {
    pub fn has_birth_year(&self) -> bool {
        self.birthday.has_year()
    }
}

/// A ranked upcoming birthday, derived per query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub member_id: String,
    pub birthday: Birthday,
    /// Calendar year of the next occurrence, today included.
    pub next_occurrence_year: i32,
    /// Age reached on the next occurrence; `None` when the year of birth is unknown.
    pub age: Option<i32>,
    /// Whether the next occurrence is today.
    pub is_today: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_full_date() {
        assert_eq!(
            Birthday::parse("2003-01-30"),
            Ok(Birthday::WithYear(date(2003, 1, 30)))
        );
    }

    #[test]
    fn parses_month_and_day() {
        assert_eq!(
            Birthday::parse(" 01-30 "),
            Ok(Birthday::without_year(1, 30).unwrap())
        );
    }

    #[test]
    fn accepts_leap_day_without_year() {
        assert_eq!(
            Birthday::parse("02-29"),
            Ok(Birthday::without_year(2, 29).unwrap())
        );
    }

    #[test]
    fn rejects_impossible_days() {
        assert!(Birthday::parse("2003-02-29").is_err());
        assert!(Birthday::parse("04-31").is_err());
        assert!(Birthday::parse("13-01").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Birthday::parse("tomorrow"),
            Err(BirthdayError::InvalidDate("tomorrow".to_string()))
        );
        assert!(Birthday::parse("").is_err());
        assert!(Birthday::parse("1-2-3-4").is_err());
    }

    #[test]
    fn stored_form_keeps_year_flag() {
        let with_year = Birthday::WithYear(date(1999, 12, 25));
        assert_eq!(with_year.to_stored(), (date(1999, 12, 25), true));

        let without_year = Birthday::without_year(2, 29).unwrap();
        let (stored, has_year) = without_year.to_stored();
        assert_eq!(stored, date(PLACEHOLDER_YEAR, 2, 29));
        assert!(!has_year);
        assert_eq!(Birthday::from_stored(stored, has_year), without_year);
    }

    #[test]
    fn year_is_only_known_with_year() {
        assert_eq!(Birthday::WithYear(date(2001, 5, 5)).year(), Some(2001));
        assert_eq!(Birthday::without_year(5, 5).unwrap().year(), None);
    }

    #[test]
    fn year_less_birthdays_only_hold_real_days() {
        assert_eq!(Birthday::without_year(2, 30), None);
        assert_eq!(Birthday::without_year(4, 31), None);
        assert_eq!(Birthday::without_year(0, 1), None);

        let leap_day = Birthday::without_year(2, 29).unwrap();
        assert_eq!(leap_day.month_day(), (2, 29));
        assert_eq!(leap_day.to_stored(), (date(PLACEHOLDER_YEAR, 2, 29), false));
    }

    #[test]
    fn stored_year_less_date_is_normalised_to_placeholder_year() {
        let stored = Birthday::from_stored(date(1996, 2, 29), false);

        assert_eq!(stored, Birthday::without_year(2, 29).unwrap());
        assert_eq!(stored.to_stored(), (date(PLACEHOLDER_YEAR, 2, 29), false));
    }
}
