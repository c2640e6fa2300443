//! Arrow-key movement of the focused day, including movement past the
//! edges of the displayed month

use crate::grid::MonthGrid;
use crate::util::{add_months, days_in_month, DAYS_IN_WEEK};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    /// First day of the focused week (within the month)
    Home,
    /// Last day of the focused week (within the month)
    End,
    /// Same day of the previous month, clamped to its length
    PageUp,
    /// Same day of the next month, clamped to its length
    PageDown,
}

/// Where focus lands: `month_offset` months away from the displayed month,
/// on day `day` of that month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NavTarget {
    pub month_offset: i32,
    pub day: u8,
}

pub fn navigate(grid: &MonthGrid, focused: u8, key: NavKey) -> NavTarget {
    let len = grid.num_days_in_current_month();
    let focused = focused.clamp(1, len);
    let week = i32::from(DAYS_IN_WEEK);
    let day = i32::from(focused);
    match key {
        NavKey::Left => wrap(grid, day - 1),
        NavKey::Right => wrap(grid, day + 1),
        NavKey::Up => wrap(grid, day - week),
        NavKey::Down => wrap(grid, day + week),
        NavKey::Home => NavTarget {
            month_offset: 0,
            day: focused.saturating_sub(grid.column_of(focused)).max(1),
        },
        NavKey::End => NavTarget {
            month_offset: 0,
            day: focused
                .saturating_add(DAYS_IN_WEEK - 1 - grid.column_of(focused))
                .min(len),
        },
        NavKey::PageUp => same_day_in(grid, focused, -1),
        NavKey::PageDown => same_day_in(grid, focused, 1),
    }
}

// `day` is a day number relative to the displayed month that may fall up to
// a week outside of it
fn wrap(grid: &MonthGrid, day: i32) -> NavTarget {
    let len = i32::from(grid.num_days_in_current_month());
    let (month_offset, day) = if day < 1 {
        (-1, day + i32::from(grid.num_days_in_prev_month()))
    } else if day > len {
        (1, day - len)
    } else {
        (0, day)
    };
    NavTarget {
        month_offset,
        day: u8::try_from(day).unwrap_or(1),
    }
}

fn same_day_in(grid: &MonthGrid, focused: u8, month_offset: i32) -> NavTarget {
    match add_months(grid.year(), grid.month(), month_offset) {
        Some((year, month)) => NavTarget {
            month_offset,
            day: focused.min(days_in_month(year, month)),
        },
        None => NavTarget {
            month_offset: 0,
            day: focused,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compute_grid;
    use time::Month::*;
    use time::Weekday::*;

    fn target(month_offset: i32, day: u8) -> NavTarget {
        NavTarget { month_offset, day }
    }

    #[test]
    fn test_within_month() {
        let grid = compute_grid(2024, September, Sunday).unwrap();
        assert_eq!(navigate(&grid, 10, NavKey::Left), target(0, 9));
        assert_eq!(navigate(&grid, 10, NavKey::Right), target(0, 11));
        assert_eq!(navigate(&grid, 10, NavKey::Up), target(0, 3));
        assert_eq!(navigate(&grid, 10, NavKey::Down), target(0, 17));
    }

    #[test]
    fn test_across_month_edges() {
        let grid = compute_grid(2024, September, Sunday).unwrap();
        assert_eq!(navigate(&grid, 1, NavKey::Left), target(-1, 31));
        assert_eq!(navigate(&grid, 3, NavKey::Up), target(-1, 27));
        assert_eq!(navigate(&grid, 30, NavKey::Right), target(1, 1));
        assert_eq!(navigate(&grid, 28, NavKey::Down), target(1, 5));
        let grid = compute_grid(2024, March, Sunday).unwrap();
        assert_eq!(navigate(&grid, 2, NavKey::Up), target(-1, 24));
    }

    #[test]
    fn test_home_end() {
        // September 2024 starts on a Sunday; the 11th is a Wednesday
        let grid = compute_grid(2024, September, Sunday).unwrap();
        assert_eq!(navigate(&grid, 11, NavKey::Home), target(0, 8));
        assert_eq!(navigate(&grid, 11, NavKey::End), target(0, 14));
        assert_eq!(navigate(&grid, 30, NavKey::End), target(0, 30));
        let grid = compute_grid(2024, September, Monday).unwrap();
        assert_eq!(navigate(&grid, 1, NavKey::Home), target(0, 1));
        assert_eq!(navigate(&grid, 4, NavKey::Home), target(0, 2));
        assert_eq!(navigate(&grid, 4, NavKey::End), target(0, 8));
    }

    #[test]
    fn test_page_keys_clamp() {
        let grid = compute_grid(2024, March, Sunday).unwrap();
        assert_eq!(navigate(&grid, 31, NavKey::PageUp), target(-1, 29));
        assert_eq!(navigate(&grid, 31, NavKey::PageDown), target(1, 30));
        assert_eq!(navigate(&grid, 15, NavKey::PageDown), target(1, 15));
    }

    #[test]
    fn test_out_of_range_focus_is_clamped() {
        let grid = compute_grid(2023, February, Sunday).unwrap();
        assert_eq!(navigate(&grid, 31, NavKey::Left), target(0, 27));
        assert_eq!(navigate(&grid, 0, NavKey::Right), target(0, 2));
    }
}
