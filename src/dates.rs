use std::iter::successors;
use time::{
    format_description::FormatItem, macros::format_description, Date, Month, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Render a date as `YYYY-MM-DD`.  Years before 1 CE get a leading `-`.
pub(crate) fn format_date(date: Date) -> String {
    let year = date.year();
    let sign = if year < 0 { "-" } else { "" };
    format!(
        "{sign}{:04}-{:02}-{:02}",
        year.unsigned_abs(),
        u8::from(date.month()),
        date.day()
    )
}

pub(crate) fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

/// Every day from `start` through `end`, inclusive and in ascending order.
/// Yields nothing if `start > end`.
pub(crate) fn days_in_range(start: Date, end: Date) -> impl Iterator<Item = Date> {
    successors(Some(start), |&d| d.next_day()).take_while(move |&d| d <= end)
}

/// The formatted date of every Saturday and Sunday from `start` through `end`
pub(crate) fn weekends_in_range(start: Date, end: Date) -> Vec<String> {
    days_in_range(start, end)
        .filter(|&d| is_weekend(d))
        .map(format_date)
        .collect()
}

/// Every day of the given month.  Yields nothing if the month is outside the
/// range of representable dates.
pub(crate) fn days_of_month(year: i32, month: Month) -> impl Iterator<Item = Date> {
    let first = Date::from_calendar_date(year, month, 1).ok();
    successors(first, |&d| d.next_day()).take_while(move |d| d.month() == month)
}
