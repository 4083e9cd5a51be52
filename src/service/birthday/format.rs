//! Display strings for birthday embeds and announcements.

use chrono::Month;

use crate::model::birthday::UpcomingBirthday;

/// Placeholder replaced with the celebrant's mention in `birthday.md`.
pub const MENTION_PLACEHOLDER: &str = "{mention}";
/// Placeholder replaced with the celebrant's ordinal age in `birthday.md`.
pub const AGE_PLACEHOLDER: &str = "{age}";

/// Formats the next occurrence as `DD Month YYYY`, with ` (Today)` appended when it
/// is today.
///
/// # Examples
/// - `21 June 2024 (Today)`
/// - `30 January 2025`
pub fn format_upcoming_date(entry: &UpcomingBirthday) -> String {
    let month = u8::try_from(entry.birthday.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown");

    let mut formatted = format!(
        "{:02} {} {}",
        entry.birthday.day(),
        month,
        entry.next_occurrence_year
    );
    if entry.is_today {
        formatted.push_str(" (Today)");
    }

    formatted
}

/// Member mention followed by the age in parentheses, when it is known.
pub fn format_upcoming_member(entry: &UpcomingBirthday) -> String {
    match entry.age {
        Some(age) => format!("<@{}> ({})", entry.member_id, age),
        None => format!("<@{}>", entry.member_id),
    }
}

/// English ordinal for a number: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
pub fn ordinal(number: i32) -> String {
    let last = number.rem_euclid(10);
    let last_two = number.rem_euclid(100);

    let suffix = match (last, last_two) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };

    format!("{}{}", number, suffix)
}

/// Fills the announcement template.
///
/// Every `{mention}` becomes `mention` and every `{age}` becomes the ordinal age, or
/// nothing when the year of birth is unknown.
pub fn render_announcement(template: &str, mention: &str, age: Option<i32>) -> String {
    let age = age.map(ordinal).unwrap_or_default();

    template
        .replace(AGE_PLACEHOLDER, &age)
        .replace(MENTION_PLACEHOLDER, mention)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::birthday::Birthday;

    fn entry(birthday: Birthday, year: i32, age: Option<i32>, is_today: bool) -> UpcomingBirthday {
        UpcomingBirthday {
            member_id: "42".to_string(),
            birthday,
            next_occurrence_year: year,
            age,
            is_today,
        }
    }

    #[test]
    fn formats_today_with_suffix() {
        let today = entry(Birthday::parse("2000-06-21").unwrap(), 2024, Some(24), true);
        assert_eq!(format_upcoming_date(&today), "21 June 2024 (Today)");
    }

    #[test]
    fn pads_single_digit_days() {
        let later = entry(Birthday::parse("01-03").unwrap(), 2025, None, false);
        assert_eq!(format_upcoming_date(&later), "03 January 2025");
    }

    #[test]
    fn omits_unknown_age() {
        let with_age = entry(Birthday::parse("2000-06-21").unwrap(), 2024, Some(24), true);
        let without = entry(Birthday::parse("06-21").unwrap(), 2024, None, true);

        assert_eq!(format_upcoming_member(&with_age), "<@42> (24)");
        assert_eq!(format_upcoming_member(&without), "<@42>");
    }

    #[test]
    fn ordinals_handle_teens() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (101, "101st"),
            (111, "111th"),
        ];

        for (number, expected) in cases {
            assert_eq!(ordinal(number), expected);
        }
    }

    #[test]
    fn renders_every_placeholder() {
        let template = "Happy {age} birthday {mention}! Everyone wish {mention} well.";

        assert_eq!(
            render_announcement(template, "<@42>", Some(21)),
            "Happy 21st birthday <@42>! Everyone wish <@42> well."
        );
    }

    #[test]
    fn renders_without_age() {
        let template = "Happy {age} birthday {mention}!";

        assert_eq!(
            render_announcement(template, "<@42>", None),
            "Happy  birthday <@42>!"
        );
    }
}
