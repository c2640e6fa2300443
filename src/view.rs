use crate::error::OutOfTimeError;
use crate::util::{add_months, first_of_month};
use time::{Date, Month};

/// The displayed year & month.  Stored as the first day of that month.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ViewState {
    first: Date,
}

impl ViewState {
    /// The view displaying the month that contains `date`
    pub fn containing(date: Date) -> ViewState {
        // Every month has a day 1, so this never falls back.
        let first = date.replace_day(1).unwrap_or(date);
        ViewState { first }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    pub fn first_of_month(&self) -> Date {
        self.first
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Moves the view by `offset` months.  On failure, the view is left
    /// unchanged.
    pub fn navigate_month(&mut self, offset: i32) -> Result<(), OutOfTimeError> {
        let (year, month) = add_months(self.year(), self.month(), offset).ok_or(OutOfTimeError)?;
        self.first = first_of_month(year, month)?;
        Ok(())
    }

    pub fn jump_to_month(&mut self, month: Month) -> Result<(), OutOfTimeError> {
        self.first = first_of_month(self.year(), month)?;
        Ok(())
    }

    pub fn jump_to_year(&mut self, year: i32) -> Result<(), OutOfTimeError> {
        self.first = first_of_month(year, self.month())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    #[test]
    fn test_containing_normalizes_day() {
        let view = ViewState::containing(date!(2024 - 09 - 24));
        assert_eq!(view.first_of_month(), date!(2024 - 09 - 01));
        assert_eq!(view.year(), 2024);
        assert_eq!(view.month(), September);
        assert!(view.contains(date!(2024 - 09 - 30)));
        assert!(!view.contains(date!(2024 - 10 - 01)));
    }

    #[test]
    fn test_navigate_across_years() {
        let mut view = ViewState::containing(date!(2024 - 12 - 31));
        view.navigate_month(1).unwrap();
        assert_eq!(view.first_of_month(), date!(2025 - 01 - 01));
        view.navigate_month(-1).unwrap();
        assert_eq!(view.first_of_month(), date!(2024 - 12 - 01));
        let mut view = ViewState::containing(date!(2024 - 01 - 15));
        view.navigate_month(-1).unwrap();
        assert_eq!(view.first_of_month(), date!(2023 - 12 - 01));
        view.navigate_month(0).unwrap();
        assert_eq!(view.first_of_month(), date!(2023 - 12 - 01));
    }

    #[test]
    fn test_jumps() {
        let mut view = ViewState::containing(date!(2024 - 03 - 31));
        view.jump_to_month(February).unwrap();
        assert_eq!(view.first_of_month(), date!(2024 - 02 - 01));
        view.jump_to_year(2031).unwrap();
        assert_eq!(view.first_of_month(), date!(2031 - 02 - 01));
    }

    #[test]
    fn test_end_of_time() {
        let mut view = ViewState::containing(date!(9999 - 12 - 01));
        assert_eq!(view.navigate_month(1), Err(OutOfTimeError));
        assert_eq!(view.first_of_month(), date!(9999 - 12 - 01));
        assert_eq!(view.jump_to_year(10000), Err(OutOfTimeError));
        assert_eq!(view.year(), 9999);
    }
}
