use time::{Date, Month};

/// The single selected date, if any.  Independent of the displayed month: a
/// selection outside the displayed month is kept, just not drawn.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SelectionState {
    selected: Option<Date>,
}

impl SelectionState {
    pub fn new(selected: Option<Date>) -> SelectionState {
        SelectionState { selected }
    }

    pub fn get(&self) -> Option<Date> {
        self.selected
    }

    /// Replaces the selection, returning the previous one
    pub fn set(&mut self, date: Option<Date>) -> Option<Date> {
        std::mem::replace(&mut self.selected, date)
    }

    pub fn clear(&mut self) -> Option<Date> {
        self.selected.take()
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.selected == Some(date)
    }

    /// The day of month of the selection if it lies in the given month
    pub fn day_in_month(&self, year: i32, month: Month) -> Option<u8> {
        self.selected
            .filter(|d| d.year() == year && d.month() == month)
            .map(Date::day)
    }
}
