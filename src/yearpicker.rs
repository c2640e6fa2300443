//! The sliding 12-year window shown by the year picker

/// Number of years shown at once
pub const YEARS_PER_WINDOW: usize = 12;

/// Years shown before the window's base year
const YEARS_BEFORE: i32 = 4;

/// Years shown after the window's base year
const YEARS_AFTER: i32 = 7;

/// Amount by which the offsets move; always one full window
const WINDOW_STEP: i32 = 12;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Chevron {
    /// Show the previous twelve years
    Left,
    /// Show the next twelve years
    Right,
}

/// Returns the twelve years `base - 4 ..= base + 7` where `base = today_year +
/// offset + temporary_offset`
pub fn generate_window(
    today_year: i32,
    offset: i32,
    temporary_offset: i32,
) -> [i32; YEARS_PER_WINDOW] {
    let base = today_year + offset + temporary_offset;
    let mut years = [0; YEARS_PER_WINDOW];
    for (slot, year) in years.iter_mut().zip(base - YEARS_BEFORE..) {
        *slot = year;
    }
    years
}

/// A generated window, with the slots to mark as "today" and as the
/// displayed year
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearWindow {
    years: [i32; YEARS_PER_WINDOW],
    today_slot: Option<usize>,
    selected_slot: Option<usize>,
}

impl YearWindow {
    pub fn years(&self) -> &[i32; YEARS_PER_WINDOW] {
        &self.years
    }

    pub fn first(&self) -> i32 {
        self.years[0]
    }

    pub fn last(&self) -> i32 {
        self.years[YEARS_PER_WINDOW - 1]
    }

    pub fn year_at(&self, slot: usize) -> Option<i32> {
        self.years.get(slot).copied()
    }

    pub fn slot_of(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.slot_of(year).is_some()
    }

    pub fn today_slot(&self) -> Option<usize> {
        self.today_slot
    }

    pub fn selected_slot(&self) -> Option<usize> {
        self.selected_slot
    }
}

/// State of the year picker.  `offset` is the committed position of the
/// window relative to the current year; `temporary_offset` accumulates
/// chevron clicks until a year is picked or the picker is closed.  Both are
/// always multiples of twelve.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearPickerWindow {
    today_year: i32,
    offset: i32,
    temporary_offset: i32,
}

impl YearPickerWindow {
    pub fn new(today_year: i32) -> YearPickerWindow {
        YearPickerWindow {
            today_year,
            offset: 0,
            temporary_offset: 0,
        }
    }

    pub fn today_year(&self) -> i32 {
        self.today_year
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn temporary_offset(&self) -> i32 {
        self.temporary_offset
    }

    pub fn set_today_year(&mut self, today_year: i32) {
        self.today_year = today_year;
    }

    /// The window as currently browsed, marking `selected_year` if visible
    pub fn window(&self, selected_year: i32) -> YearWindow {
        let years = generate_window(self.today_year, self.offset, self.temporary_offset);
        let slot_of = |year: i32| years.iter().position(|&y| y == year);
        YearWindow {
            years,
            today_slot: slot_of(self.today_year),
            selected_slot: slot_of(selected_year),
        }
    }

    /// Browses to the previous or next window without committing
    pub fn scroll(&mut self, chevron: Chevron) {
        match chevron {
            Chevron::Left => self.temporary_offset -= WINDOW_STEP,
            Chevron::Right => self.temporary_offset += WINDOW_STEP,
        }
    }

    /// Makes the browsed window the committed one
    pub fn commit(&mut self) {
        self.offset += self.temporary_offset;
        self.temporary_offset = 0;
    }

    /// Returns to the committed window
    pub fn cancel(&mut self) {
        self.temporary_offset = 0;
    }

    /// Shifts the committed window by whole windows until `year` is visible.
    /// Returns `true` if the window moved.
    pub fn ensure_visible(&mut self, year: i32) -> bool {
        let low = self.today_year + self.offset - YEARS_BEFORE;
        let high = self.today_year + self.offset + YEARS_AFTER;
        if (low..=high).contains(&year) {
            return false;
        }
        let distance = year - (self.today_year - YEARS_BEFORE);
        self.offset = distance.div_euclid(WINDOW_STEP) * WINDOW_STEP;
        true
    }
}
