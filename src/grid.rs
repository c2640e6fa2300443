//! Computation of the fixed-size month grid: trailing days of the previous
//! month, every day of the displayed month, and leading days of the next
//! month, always 42 cells in total

use crate::error::OutOfTimeError;
use crate::util::{add_months, days_in_month, first_of_month, WeekdayExt, DAYS_IN_WEEK};
use time::{Date, Month, Weekday};

const GRID_LEN: u8 = 42;

/// Number of cells in every month grid (six weeks)
pub const GRID_CELLS: usize = GRID_LEN as usize;

/// A day of the displayed month.  `day_of_month` is 1-based and matches the
/// day's position in [`MonthGrid::days()`] plus one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarDay {
    pub day_of_month: u8,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellKind {
    /// Day from the end of the previous month; label only
    Leading,
    Current,
    /// Day from the start of the next month; label only
    Trailing,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub kind: CellKind,
    pub day: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    start_weekday: Weekday,
    first_weekday_of_month: Weekday,
    leading_count: u8,
    num_days_in_prev_month: u8,
    days: Vec<CalendarDay>,
}

/// Lays out the given month on a grid whose weeks begin on `start_weekday`.
///
/// Every day of the returned grid is unselected; callers apply the current
/// selection with [`MonthGrid::apply_selection()`].
pub fn compute_grid(
    year: i32,
    month: Month,
    start_weekday: Weekday,
) -> Result<MonthGrid, OutOfTimeError> {
    let first_weekday_of_month = first_of_month(year, month)?.weekday();
    let (prev_year, prev_month) = add_months(year, month, -1).ok_or(OutOfTimeError)?;
    let num_days_in_prev_month = days_in_month(prev_year, prev_month);
    let leading_count =
        (first_weekday_of_month.index0() + DAYS_IN_WEEK - start_weekday.index0()) % DAYS_IN_WEEK;
    let days = (1..=days_in_month(year, month))
        .map(|day_of_month| CalendarDay {
            day_of_month,
            selected: false,
        })
        .collect();
    Ok(MonthGrid {
        year,
        month,
        start_weekday,
        first_weekday_of_month,
        leading_count,
        num_days_in_prev_month,
        days,
    })
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn start_weekday(&self) -> Weekday {
        self.start_weekday
    }

    pub fn first_weekday_of_month(&self) -> Weekday {
        self.first_weekday_of_month
    }

    /// Number of cells before day 1, always in `0..7`
    pub fn leading_count(&self) -> u8 {
        self.leading_count
    }

    pub fn trailing_count(&self) -> u8 {
        GRID_LEN - self.leading_count - self.num_days_in_current_month()
    }

    pub fn num_days_in_prev_month(&self) -> u8 {
        self.num_days_in_prev_month
    }

    pub fn num_days_in_current_month(&self) -> u8 {
        // A month never has more than 31 days
        u8::try_from(self.days.len()).unwrap_or(u8::MAX)
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn contains_day(&self, day: u8) -> bool {
        (1..=self.num_days_in_current_month()).contains(&day)
    }

    pub fn contains_date(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Column (0-based, relative to the start weekday) in which the given day
    /// of the current month is drawn
    pub fn column_of(&self, day: u8) -> u8 {
        (self.leading_count + day.saturating_sub(1)) % DAYS_IN_WEEK
    }

    /// All 42 cells in display order
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let prev = self.num_days_in_prev_month;
        let leading = (prev - self.leading_count + 1..=prev).map(|day| GridCell {
            kind: CellKind::Leading,
            day,
        });
        let current = self.days.iter().map(|d| GridCell {
            kind: CellKind::Current,
            day: d.day_of_month,
        });
        let trailing = (1..=self.trailing_count()).map(|day| GridCell {
            kind: CellKind::Trailing,
            day,
        });
        leading.chain(current).chain(trailing)
    }

    pub fn selected_day(&self) -> Option<u8> {
        self.days
            .iter()
            .find(|d| d.selected)
            .map(|d| d.day_of_month)
    }

    /// Marks the day matching `selected` if it falls in this month, and
    /// unmarks every other day
    pub fn apply_selection(&mut self, selected: Option<Date>) {
        let day = selected
            .filter(|&d| self.contains_date(d))
            .map(Date::day);
        for d in &mut self.days {
            d.selected = Some(d.day_of_month) == day;
        }
    }

    /// Moves the selection mark to `day`.  Returns `false` and leaves the
    /// grid untouched if the month has no such day.
    pub fn select_day(&mut self, day: u8) -> bool {
        if !self.contains_day(day) {
            return false;
        }
        for d in &mut self.days {
            d.selected = d.day_of_month == day;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;
    use time::Weekday::*;

    fn weekdays() -> [Weekday; 7] {
        [
            Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
        ]
    }

    #[test]
    fn test_always_42_cells() {
        for start in weekdays() {
            for year in [1999, 2000, 2023, 2024, 2100] {
                for index in 0..12 {
                    let month = crate::util::month_from_index(index).unwrap();
                    let grid = compute_grid(year, month, start).unwrap();
                    assert_eq!(grid.cells().count(), GRID_CELLS, "{year} {month} {start}");
                    assert!(grid.leading_count() < 7, "{year} {month} {start}");
                }
            }
        }
    }

    #[test]
    fn test_september_2024_sunday_start() {
        // September 1, 2024 is a Sunday
        let grid = compute_grid(2024, September, Sunday).unwrap();
        assert_eq!(grid.first_weekday_of_month(), Sunday);
        assert_eq!(grid.leading_count(), 0);
        assert_eq!(grid.num_days_in_current_month(), 30);
        assert_eq!(grid.num_days_in_prev_month(), 31);
        assert_eq!(grid.trailing_count(), 12);
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(
            cells[0],
            GridCell {
                kind: CellKind::Current,
                day: 1
            }
        );
        assert_eq!(
            cells[30],
            GridCell {
                kind: CellKind::Trailing,
                day: 1
            }
        );
    }

    #[test]
    fn test_september_2024_monday_start() {
        let grid = compute_grid(2024, September, Monday).unwrap();
        assert_eq!(grid.leading_count(), 6);
        let leading = grid
            .cells()
            .take_while(|c| c.kind == CellKind::Leading)
            .map(|c| c.day)
            .collect::<Vec<_>>();
        assert_eq!(leading, [26, 27, 28, 29, 30, 31]);
        assert_eq!(grid.column_of(1), 6);
        assert_eq!(grid.column_of(2), 0);
    }

    #[test]
    fn test_leap_february() {
        let grid = compute_grid(2024, February, Sunday).unwrap();
        assert_eq!(grid.num_days_in_current_month(), 29);
        assert_eq!(grid.num_days_in_prev_month(), 31);
        let grid = compute_grid(2023, February, Sunday).unwrap();
        assert_eq!(grid.num_days_in_current_month(), 28);
        let grid = compute_grid(2024, March, Sunday).unwrap();
        assert_eq!(grid.num_days_in_prev_month(), 29);
    }

    #[test]
    fn test_january_rolls_back_to_december() {
        // January 1, 2025 is a Wednesday
        let grid = compute_grid(2025, January, Sunday).unwrap();
        assert_eq!(grid.num_days_in_prev_month(), 31);
        assert_eq!(grid.leading_count(), 3);
        let leading = grid.cells().take(3).map(|c| c.day).collect::<Vec<_>>();
        assert_eq!(leading, [29, 30, 31]);
    }

    #[test]
    fn test_apply_selection() {
        let mut grid = compute_grid(2024, September, Sunday).unwrap();
        assert_eq!(grid.selected_day(), None);
        grid.apply_selection(Some(date!(2024 - 09 - 24)));
        assert_eq!(grid.selected_day(), Some(24));
        assert_eq!(grid.days().iter().filter(|d| d.selected).count(), 1);
        grid.apply_selection(Some(date!(2024 - 10 - 24)));
        assert_eq!(grid.selected_day(), None);
        grid.apply_selection(Some(date!(2023 - 09 - 24)));
        assert_eq!(grid.selected_day(), None);
    }

    #[test]
    fn test_select_day() {
        let mut grid = compute_grid(2024, February, Sunday).unwrap();
        assert!(grid.select_day(3));
        assert!(grid.select_day(29));
        assert_eq!(grid.selected_day(), Some(29));
        assert!(!grid.select_day(30));
        assert!(!grid.select_day(0));
        assert_eq!(grid.selected_day(), Some(29));
    }

    #[test]
    fn test_end_of_time() {
        assert!(compute_grid(-9999, January, Sunday).is_ok());
        assert_eq!(compute_grid(10000, January, Sunday), Err(OutOfTimeError));
    }
}
