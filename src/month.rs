use crate::dates::days_of_month;
use std::ops::RangeInclusive;
use thiserror::Error;
use time::{Date, Month};

const DAYS_IN_WEEK: usize = 7;

/// How many years before the displayed year are offered for direct selection
const YEARS_BEFORE: i32 = 5;

/// How many years after the displayed year are offered for direct selection
const YEARS_AFTER: i32 = 4;

/// The month whose grid is currently displayed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    year: i32,
    month: Month,
}

impl MonthView {
    pub(crate) fn containing(date: Date) -> MonthView {
        MonthView {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn set_month(&mut self, month: Month) {
        self.month = month;
    }

    pub(crate) fn set_year(&mut self, year: i32) -> Result<(), OutOfTimeError> {
        if representable_years().contains(&year) {
            self.year = year;
            Ok(())
        } else {
            Err(OutOfTimeError)
        }
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        if self.month == Month::December {
            self.set_year(self.year + 1)?;
        }
        self.month = self.month.next();
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        if self.month == Month::January {
            self.set_year(self.year - 1)?;
        }
        self.month = self.month.previous();
        Ok(())
    }

    pub(crate) fn next_year(&mut self) -> Result<(), OutOfTimeError> {
        self.set_year(self.year + 1)
    }

    pub(crate) fn previous_year(&mut self) -> Result<(), OutOfTimeError> {
        self.set_year(self.year - 1)
    }

    /// The years offered when picking a year directly: five before the
    /// displayed year through four after it
    pub(crate) fn year_choices(&self) -> RangeInclusive<i32> {
        let all = representable_years();
        let first = (self.year - YEARS_BEFORE).max(*all.start());
        let last = (self.year + YEARS_AFTER).min(*all.end());
        first..=last
    }

    /// Returns the date in the displayed month with the given day of the
    /// month, moved back to the last day of the month if the month is too
    /// short
    pub(crate) fn clamp_day(&self, day: u8) -> Option<Date> {
        days_of_month(self.year, self.month)
            .take_while(|d| d.day() <= day)
            .last()
    }

    /// The displayed month laid out in weeks starting on Monday, with `None`
    /// for the cells before the first and after the last day of the month
    pub(crate) fn weeks(&self) -> Vec<[Option<Date>; DAYS_IN_WEEK]> {
        let mut weeks = Vec::with_capacity(6);
        let mut week = [None; DAYS_IN_WEEK];
        for date in days_of_month(self.year, self.month) {
            let i = usize::from(date.weekday().number_days_from_monday());
            week[i] = Some(date);
            if i == DAYS_IN_WEEK - 1 {
                weeks.push(std::mem::take(&mut week));
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }
}

fn representable_years() -> RangeInclusive<i32> {
    Date::MIN.year()..=Date::MAX.year()
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
