//! Month and weekday arithmetic shared by the grid, the views, and the
//! keyboard navigation

use crate::error::{CalendarError, OutOfTimeError};
use time::{Date, Month, Weekday};

pub const DAYS_IN_WEEK: u8 = 7;

pub const MONTHS_IN_YEAR: u8 = 12;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

pub(crate) trait MonthExt {
    fn index0(&self) -> u8;
}

impl MonthExt for Month {
    fn index0(&self) -> u8 {
        u8::from(*self) - 1
    }
}

/// Converts a 0-based month index (0 = January) into a [`Month`]
pub fn month_from_index(index: u8) -> Result<Month, CalendarError> {
    index
        .checked_add(1)
        .and_then(|n| Month::try_from(n).ok())
        .ok_or(CalendarError::InvalidMonthIndex(index))
}

/// Converts a 0-based weekday index (0 = Sunday) into a [`Weekday`]
pub fn weekday_from_index(index: u8) -> Result<Weekday, CalendarError> {
    use Weekday::*;
    match index {
        0 => Ok(Sunday),
        1 => Ok(Monday),
        2 => Ok(Tuesday),
        3 => Ok(Wednesday),
        4 => Ok(Thursday),
        5 => Ok(Friday),
        6 => Ok(Saturday),
        _ => Err(CalendarError::InvalidWeekdayIndex(index)),
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Returns the year & month lying `offset` months after the given one,
/// rolling over year boundaries in both directions.  Returns `None` on
/// integer overflow.
pub fn add_months(year: i32, month: Month, offset: i32) -> Option<(i32, Month)> {
    let total = year
        .checked_mul(i32::from(MONTHS_IN_YEAR))?
        .checked_add(i32::from(month.index0()))?
        .checked_add(offset)?;
    let months = i32::from(MONTHS_IN_YEAR);
    let index = u8::try_from(total.rem_euclid(months)).ok()?;
    let month = month_from_index(index).ok()?;
    Some((total.div_euclid(months), month))
}

pub fn first_of_month(year: i32, month: Month) -> Result<Date, OutOfTimeError> {
    Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)
}
