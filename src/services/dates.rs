// Date formatting for the results announcement

use chrono::{Datelike, Local, NaiveDate};

/// Tomorrow's local date, e.g. "October 20th, 2025"
pub fn tomorrow_pretty() -> String {
    pretty_day_after(Local::now().date_naive())
}

/// Formats the day after `today` as "<Month> <day><suffix>, <year>"
pub fn pretty_day_after(today: NaiveDate) -> String {
    let tomorrow = today.succ_opt().unwrap_or(today);
    let day = tomorrow.day();
    format!(
        "{} {}{}, {}",
        tomorrow.format("%B"),
        day,
        ordinal_suffix(day),
        tomorrow.year()
    )
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) || (24..=30).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
