//! Construction-time configuration and notification callbacks

use crate::events::EventRecord;
use crate::index::BulletMode;
use crate::labels::{MonthDisplayType, WeekdayDisplayType};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Weekday};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CalendarSize {
    Small,
    #[default]
    Large,
}

impl FromStr for CalendarSize {
    type Err = ParseCalendarSizeError;

    fn from_str(s: &str) -> Result<CalendarSize, ParseCalendarSizeError> {
        match s {
            "small" => Ok(CalendarSize::Small),
            "large" => Ok(CalendarSize::Large),
            _ => Err(ParseCalendarSizeError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid calendar size; expected \"small\" or \"large\"")]
pub struct ParseCalendarSizeError;

/// The selection the calendar starts with
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum InitialSelection {
    #[default]
    Today,
    Nothing,
    Date(Date),
}

pub type MonthChangeFn = Box<dyn FnMut(Date, &[EventRecord])>;

pub type SelectedDateChangeFn = Box<dyn FnMut(Option<Date>, &[EventRecord])>;

pub type SelectedDateClickFn = Box<dyn FnMut(Date, &[EventRecord])>;

/// Notification sinks.  Each is invoked at most once per intent, with the
/// date-change notification always preceding the month-change one.
#[derive(Default)]
pub struct Callbacks {
    on_month_change: Option<MonthChangeFn>,
    on_selected_date_change: Option<SelectedDateChangeFn>,
    on_selected_date_click: Option<SelectedDateClickFn>,
}

impl Callbacks {
    /// Called with the first day of the newly displayed month and that
    /// month's events
    pub(crate) fn month_changed(&mut self, first_of_month: Date, events: &[EventRecord]) {
        if let Some(f) = self.on_month_change.as_mut() {
            f(first_of_month, events);
        }
    }

    pub(crate) fn selected_date_changed(&mut self, date: Option<Date>, events: &[EventRecord]) {
        if let Some(f) = self.on_selected_date_change.as_mut() {
            f(date, events);
        }
    }

    pub(crate) fn selected_date_clicked(&mut self, date: Date, events: &[EventRecord]) {
        if let Some(f) = self.on_selected_date_click.as_mut() {
            f(date, events);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_month_change", &self.on_month_change.is_some())
            .field(
                "on_selected_date_change",
                &self.on_selected_date_change.is_some(),
            )
            .field(
                "on_selected_date_click",
                &self.on_selected_date_click.is_some(),
            )
            .finish()
    }
}

#[derive(Debug)]
pub struct CalendarOptions {
    pub(crate) calendar_size: CalendarSize,
    pub(crate) start_weekday: Weekday,
    pub(crate) weekday_display: WeekdayDisplayType,
    pub(crate) month_display: MonthDisplayType,
    pub(crate) custom_month_values: Option<Vec<String>>,
    pub(crate) custom_weekday_values: Option<Vec<String>>,
    pub(crate) events: Vec<EventRecord>,
    pub(crate) bullet_mode: BulletMode,
    pub(crate) disable_month_year_pickers: bool,
    pub(crate) disable_day_click: bool,
    pub(crate) disable_month_arrow_click: bool,
    pub(crate) initial_selection: InitialSelection,
    pub(crate) callbacks: Callbacks,
}

impl CalendarOptions {
    pub fn new() -> CalendarOptions {
        CalendarOptions::default()
    }

    pub fn calendar_size(mut self, size: CalendarSize) -> Self {
        self.calendar_size = size;
        self
    }

    pub fn start_weekday(mut self, weekday: Weekday) -> Self {
        self.start_weekday = weekday;
        self
    }

    pub fn weekday_display(mut self, display: WeekdayDisplayType) -> Self {
        self.weekday_display = display;
        self
    }

    pub fn month_display(mut self, display: MonthDisplayType) -> Self {
        self.month_display = display;
        self
    }

    /// Twelve month names, January first
    pub fn custom_month_values(mut self, values: Vec<String>) -> Self {
        self.custom_month_values = Some(values);
        self
    }

    /// Seven weekday names, Sunday first
    pub fn custom_weekday_values(mut self, values: Vec<String>) -> Self {
        self.custom_weekday_values = Some(values);
        self
    }

    pub fn events(mut self, events: Vec<EventRecord>) -> Self {
        self.events = events;
        self
    }

    pub fn bullet_mode(mut self, mode: BulletMode) -> Self {
        self.bullet_mode = mode;
        self
    }

    pub fn disable_month_year_pickers(mut self, flag: bool) -> Self {
        self.disable_month_year_pickers = flag;
        self
    }

    pub fn disable_day_click(mut self, flag: bool) -> Self {
        self.disable_day_click = flag;
        self
    }

    pub fn disable_month_arrow_click(mut self, flag: bool) -> Self {
        self.disable_month_arrow_click = flag;
        self
    }

    pub fn initial_selection(mut self, selection: InitialSelection) -> Self {
        self.initial_selection = selection;
        self
    }

    pub fn on_month_change<F>(mut self, func: F) -> Self
    where
        F: FnMut(Date, &[EventRecord]) + 'static,
    {
        self.callbacks.on_month_change = Some(Box::new(func));
        self
    }

    pub fn on_selected_date_change<F>(mut self, func: F) -> Self
    where
        F: FnMut(Option<Date>, &[EventRecord]) + 'static,
    {
        self.callbacks.on_selected_date_change = Some(Box::new(func));
        self
    }

    pub fn on_selected_date_click<F>(mut self, func: F) -> Self
    where
        F: FnMut(Date, &[EventRecord]) + 'static,
    {
        self.callbacks.on_selected_date_click = Some(Box::new(func));
        self
    }
}

impl Default for CalendarOptions {
    fn default() -> CalendarOptions {
        CalendarOptions {
            calendar_size: CalendarSize::default(),
            start_weekday: Weekday::Sunday,
            weekday_display: WeekdayDisplayType::default(),
            month_display: MonthDisplayType::default(),
            custom_month_values: None,
            custom_weekday_values: None,
            events: Vec::new(),
            bullet_mode: BulletMode::default(),
            disable_month_year_pickers: false,
            disable_day_click: false,
            disable_month_arrow_click: false,
            initial_selection: InitialSelection::default(),
            callbacks: Callbacks::default(),
        }
    }
}
