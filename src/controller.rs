//! The calendar controller: receives intents from the host (clicks, keys,
//! API calls), updates the view, selection, and year picker state, rebuilds
//! the month grid and event index, and fires notifications.

use crate::container::{Container, ContainerLookup};
use crate::error::{CalendarError, OutOfTimeError};
use crate::events::EventRecord;
use crate::grid::{compute_grid, CalendarDay, MonthGrid};
use crate::index::{date_events, BulletMode, EventIndex};
use crate::keyboard::{navigate, NavKey};
use crate::labels::Labels;
use crate::options::{CalendarOptions, CalendarSize, Callbacks, InitialSelection};
use crate::selection::SelectionState;
use crate::util::{month_from_index, MonthExt};
use crate::view::ViewState;
use crate::yearpicker::{Chevron, YearPickerWindow, YearWindow};
use time::{Date, Month, Weekday};
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PickerMode {
    Month,
    Year,
}

/// Which overlay, if any, is showing
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PickerStatus {
    Closed,
    Month,
    Year,
}

/// Element that should receive focus once the host has drawn the state
/// produced by the last intent
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FocusRequest {
    Day(u8),
    MonthLabel,
    YearLabel,
    MonthOption(Month),
    /// Slot in the year window
    YearOption(usize),
}

// The overlay's mode survives closing so that the next open of the same kind
// can be told apart from a switch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct PickerState {
    open: bool,
    mode: PickerMode,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
struct Gates {
    month_year_pickers: bool,
    day_click: bool,
    month_arrow_click: bool,
}

#[derive(Debug)]
pub struct CalendarController<T> {
    container: T,
    today: Date,
    size: CalendarSize,
    start_weekday: Weekday,
    bullet_mode: BulletMode,
    disabled: Gates,
    labels: Labels,
    callbacks: Callbacks,
    events: Vec<EventRecord>,
    view: ViewState,
    selection: SelectionState,
    years: YearPickerWindow,
    grid: MonthGrid,
    index: EventIndex,
    picker: PickerState,
    focus: Option<FocusRequest>,
}

impl<T> CalendarController<T> {
    /// Creates a calendar displaying the month of `today`.
    ///
    /// Fails if the container cannot be resolved or the custom labels are
    /// malformed.  No callbacks are invoked during construction.
    pub fn new<L>(
        container: Container<T>,
        lookup: &L,
        options: CalendarOptions,
        today: Date,
    ) -> Result<CalendarController<T>, CalendarError>
    where
        L: ContainerLookup<T> + ?Sized,
    {
        let container = container.resolve(lookup)?;
        let CalendarOptions {
            calendar_size,
            start_weekday,
            weekday_display,
            month_display,
            custom_month_values,
            custom_weekday_values,
            events,
            bullet_mode,
            disable_month_year_pickers,
            disable_day_click,
            disable_month_arrow_click,
            initial_selection,
            callbacks,
        } = options;
        let labels = Labels::new(
            month_display,
            weekday_display,
            custom_month_values,
            custom_weekday_values,
        )?;
        let selected = match initial_selection {
            InitialSelection::Today => Some(today),
            InitialSelection::Nothing => None,
            InitialSelection::Date(date) => Some(date),
        };
        let view = ViewState::containing(today);
        let mut years = YearPickerWindow::new(today.year());
        years.ensure_visible(view.year());
        let (grid, index) = build(&events, view, start_weekday, selected)?;
        debug!(
            %today,
            selected = ?selected,
            events = events.len(),
            "Created calendar"
        );
        Ok(CalendarController {
            container,
            today,
            size: calendar_size,
            start_weekday,
            bullet_mode,
            disabled: Gates {
                month_year_pickers: disable_month_year_pickers,
                day_click: disable_day_click,
                month_arrow_click: disable_month_arrow_click,
            },
            labels,
            callbacks,
            events,
            view,
            selection: SelectionState::new(selected),
            years,
            grid,
            index,
            picker: PickerState {
                open: false,
                mode: PickerMode::Month,
            },
            focus: None,
        })
    }

    pub fn container(&self) -> &T {
        &self.container
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Updates the date used for the "today" markers, e.g., after midnight
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
        self.years.set_today_year(today.year());
        self.years.ensure_visible(self.view.year());
    }

    pub fn size(&self) -> CalendarSize {
        self.size
    }

    pub fn start_weekday(&self) -> Weekday {
        self.start_weekday
    }

    pub fn bullet_mode(&self) -> BulletMode {
        self.bullet_mode
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// First day of the displayed month
    pub fn view_date(&self) -> Date {
        self.view.first_of_month()
    }

    pub fn view_year(&self) -> i32 {
        self.view.year()
    }

    pub fn view_month(&self) -> Month {
        self.view.month()
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn days(&self) -> &[CalendarDay] {
        self.grid.days()
    }

    pub fn event_index(&self) -> &EventIndex {
        &self.index
    }

    pub fn picker_status(&self) -> PickerStatus {
        match self.picker {
            PickerState { open: false, .. } => PickerStatus::Closed,
            PickerState {
                mode: PickerMode::Month,
                ..
            } => PickerStatus::Month,
            PickerState {
                mode: PickerMode::Year,
                ..
            } => PickerStatus::Year,
        }
    }

    pub fn picker_mode(&self) -> PickerMode {
        self.picker.mode
    }

    /// The year picker's window as currently browsed, with the displayed
    /// year marked as selected
    pub fn year_window(&self) -> YearWindow {
        self.years.window(self.view.year())
    }

    pub fn year_picker(&self) -> &YearPickerWindow {
        &self.years
    }

    /// The focus target produced by the most recent intent, if not yet taken.
    /// Hosts call this after drawing, once the new state is on screen.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.focus.take()
    }

    pub fn get_selected_date(&self) -> Option<Date> {
        self.selection.get()
    }

    /// Selects `date` (or clears the selection), shows its month (or the
    /// current month), and notifies the host
    pub fn set_selected_date(&mut self, date: Option<Date>) -> Result<(), CalendarError> {
        self.reset(date)
    }

    /// Replaces the event list, returning the new number of events
    pub fn set_events_data(&mut self, events: Vec<EventRecord>) -> usize {
        self.events = events;
        self.reindex();
        self.events.len()
    }

    /// Appends to the event list, returning the new number of events
    pub fn add_events_data(&mut self, events: Vec<EventRecord>) -> usize {
        self.events.extend(events);
        self.reindex();
        self.events.len()
    }

    pub fn get_events_data(&self) -> Vec<EventRecord> {
        self.events.clone()
    }

    /// Events covering `date`, looked up within `date`'s own month
    pub fn get_date_events(&self, date: Date) -> Vec<EventRecord> {
        date_events(&self.events, date)
    }

    /// Events belonging to the displayed month
    pub fn get_month_events(&self) -> Vec<EventRecord> {
        self.index.month_events().to_vec()
    }

    /// Shows the previous month.  Unlike [`click_prev_month()`], this is not
    /// affected by `disable_month_arrow_click`.
    ///
    /// [`click_prev_month()`]: CalendarController::click_prev_month
    pub fn handle_prev_month_button_click(&mut self) -> Result<(), CalendarError> {
        self.step_month(-1)
    }

    /// Shows the next month.  Unlike [`click_next_month()`], this is not
    /// affected by `disable_month_arrow_click`.
    ///
    /// [`click_next_month()`]: CalendarController::click_next_month
    pub fn handle_next_month_button_click(&mut self) -> Result<(), CalendarError> {
        self.step_month(1)
    }

    pub fn click_prev_month(&mut self) -> Result<(), CalendarError> {
        if self.disabled.month_arrow_click {
            return Ok(());
        }
        self.step_month(-1)
    }

    pub fn click_next_month(&mut self) -> Result<(), CalendarError> {
        if self.disabled.month_arrow_click {
            return Ok(());
        }
        self.step_month(1)
    }

    pub fn click_month_label(&mut self) {
        if self.disabled.month_year_pickers {
            return;
        }
        if self.picker_status() == PickerStatus::Month {
            self.close_picker();
            self.focus = Some(FocusRequest::MonthLabel);
        } else {
            self.years.cancel();
            self.picker = PickerState {
                open: true,
                mode: PickerMode::Month,
            };
            self.focus = Some(FocusRequest::MonthOption(self.view.month()));
            debug!(month = %self.view.month(), "Opened month picker");
        }
    }

    pub fn click_year_label(&mut self) {
        if self.disabled.month_year_pickers {
            return;
        }
        if self.picker_status() == PickerStatus::Year {
            self.close_picker();
            self.focus = Some(FocusRequest::YearLabel);
        } else {
            self.years.cancel();
            self.years.ensure_visible(self.view.year());
            self.picker = PickerState {
                open: true,
                mode: PickerMode::Year,
            };
            let window = self.year_window();
            if let Some(slot) = window.selected_slot() {
                self.focus = Some(FocusRequest::YearOption(slot));
            }
            debug!(
                first = window.first(),
                last = window.last(),
                "Opened year picker"
            );
        }
    }

    /// Closes the picker overlay, discarding any year-window browsing
    pub fn close_picker(&mut self) {
        self.picker.open = false;
        self.years.cancel();
    }

    /// Browses the year picker by one window.  Does nothing unless the year
    /// picker is showing.
    pub fn scroll_year_window(&mut self, chevron: Chevron) {
        if self.picker_status() != PickerStatus::Year {
            return;
        }
        self.years.scroll(chevron);
        debug!(
            ?chevron,
            temporary_offset = self.years.temporary_offset(),
            "Scrolled year picker"
        );
    }

    pub fn pick_month(&mut self, month: Month) -> Result<(), CalendarError> {
        if self.disabled.month_year_pickers {
            return Ok(());
        }
        let mut view = self.view;
        view.jump_to_month(month)?;
        self.show(view)?;
        self.close_picker();
        self.focus = Some(FocusRequest::MonthLabel);
        debug!(%month, year = view.year(), "Picked month");
        self.notify_month_change();
        Ok(())
    }

    /// Picks a month by 0-based index (0 = January)
    pub fn pick_month_index(&mut self, index: u8) -> Result<(), CalendarError> {
        let month = month_from_index(index)?;
        self.pick_month(month)
    }

    pub fn pick_year(&mut self, year: i32) -> Result<(), CalendarError> {
        if self.disabled.month_year_pickers {
            return Ok(());
        }
        let mut view = self.view;
        view.jump_to_year(year)
            .map_err(|_| CalendarError::InvalidYear(year))?;
        let (grid, index) = build(&self.events, view, self.start_weekday, self.selection.get())?;
        self.years.commit();
        self.install(view, grid, index);
        self.close_picker();
        self.focus = Some(FocusRequest::YearLabel);
        debug!(year, offset = self.years.offset(), "Picked year");
        self.notify_month_change();
        Ok(())
    }

    /// Selects `day` of the displayed month.  Clicking the already-selected
    /// day reports a click instead of a change.
    pub fn click_day(&mut self, day: u8) -> Result<(), CalendarError> {
        if self.disabled.day_click {
            return Ok(());
        }
        let date = Date::from_calendar_date(self.view.year(), self.view.month(), day).map_err(
            |_| CalendarError::InvalidDay {
                year: self.view.year(),
                month: self.view.month(),
                day,
            },
        )?;
        self.focus = Some(FocusRequest::Day(day));
        if self.selection.is_selected(date) {
            debug!(%date, "Clicked selected date");
            let events = self.index.day_events(day).cloned().collect::<Vec<_>>();
            self.callbacks.selected_date_clicked(date, &events);
            return Ok(());
        }
        self.selection.set(Some(date));
        self.grid.select_day(day);
        debug!(%date, "Selected date");
        self.notify_selected_date_change();
        Ok(())
    }

    /// Moves keyboard focus from `focused` (a day of the displayed month).
    /// Leaving the month shows the adjacent month, unless month arrows are
    /// disabled, in which case focus stops at the month's edge.
    pub fn handle_day_key(&mut self, focused: u8, key: NavKey) -> Result<(), CalendarError> {
        let target = navigate(&self.grid, focused, key);
        let day = if target.month_offset == 0 {
            target.day
        } else if self.disabled.month_arrow_click {
            if target.month_offset < 0 {
                1
            } else {
                self.grid.num_days_in_current_month()
            }
        } else {
            self.step_month(target.month_offset)?;
            target.day
        };
        self.focus = Some(FocusRequest::Day(day));
        Ok(())
    }

    fn step_month(&mut self, offset: i32) -> Result<(), CalendarError> {
        let mut view = self.view;
        view.navigate_month(offset)?;
        self.show(view)?;
        self.close_picker();
        debug!(
            year = view.year(),
            month = %view.month(),
            "Navigated {offset:+} month(s)"
        );
        self.notify_month_change();
        Ok(())
    }

    fn reset(&mut self, date: Option<Date>) -> Result<(), CalendarError> {
        let view = ViewState::containing(date.unwrap_or(self.today));
        let month_changed = view != self.view;
        let (grid, index) = build(&self.events, view, self.start_weekday, date)?;
        self.selection.set(date);
        self.years.cancel();
        self.install(view, grid, index);
        debug!(selected = ?date, month_changed, "Reset calendar");
        self.notify_selected_date_change();
        if month_changed {
            self.notify_month_change();
        }
        Ok(())
    }

    // Validates and computes everything before touching `self`, so that a
    // failure leaves the calendar as it was.
    fn show(&mut self, view: ViewState) -> Result<(), OutOfTimeError> {
        let (grid, index) = build(&self.events, view, self.start_weekday, self.selection.get())?;
        self.install(view, grid, index);
        Ok(())
    }

    fn install(&mut self, view: ViewState, grid: MonthGrid, index: EventIndex) {
        self.view = view;
        self.grid = grid;
        self.index = index;
        if self.years.ensure_visible(view.year()) {
            debug!(
                offset = self.years.offset(),
                "Shifted year picker to keep {} visible",
                view.year()
            );
        }
    }

    fn reindex(&mut self) {
        self.index = EventIndex::for_month(&self.events, self.view.year(), self.view.month());
        debug!(
            events = self.events.len(),
            month_events = self.index.month_events().len(),
            "Updated events"
        );
    }

    fn notify_month_change(&mut self) {
        self.callbacks
            .month_changed(self.view.first_of_month(), self.index.month_events());
    }

    fn notify_selected_date_change(&mut self) {
        let selected = self.selection.get();
        let events = selected.map_or_else(Vec::new, |date| date_events(&self.events, date));
        self.callbacks.selected_date_changed(selected, &events);
    }

    /// Index (0-based) of the displayed month, for highlighting in the month
    /// picker
    pub fn highlighted_month_index(&self) -> usize {
        usize::from(self.view.month().index0())
    }
}

fn build(
    events: &[EventRecord],
    view: ViewState,
    start_weekday: Weekday,
    selected: Option<Date>,
) -> Result<(MonthGrid, EventIndex), OutOfTimeError> {
    let mut grid = compute_grid(view.year(), view.month(), start_weekday)?;
    grid.apply_selection(selected);
    let index = EventIndex::for_month(events, view.year(), view.month());
    Ok((grid, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::date;
    use time::Month::*;

    #[derive(Clone, Debug, Eq, PartialEq)]
    enum Note {
        Month(Date, usize),
        Selected(Option<Date>, usize),
        Clicked(Date, usize),
    }

    type Log = Rc<RefCell<Vec<Note>>>;

    fn logged(options: CalendarOptions) -> (CalendarOptions, Log) {
        let log = Log::default();
        let l1 = Rc::clone(&log);
        let l2 = Rc::clone(&log);
        let l3 = Rc::clone(&log);
        let options = options
            .on_month_change(move |d, evs| l1.borrow_mut().push(Note::Month(d, evs.len())))
            .on_selected_date_change(move |d, evs| {
                l2.borrow_mut().push(Note::Selected(d, evs.len()));
            })
            .on_selected_date_click(move |d, evs| {
                l3.borrow_mut().push(Note::Clicked(d, evs.len()));
            });
        (options, log)
    }

    fn calendar(options: CalendarOptions) -> (CalendarController<()>, Log) {
        let (options, log) = logged(options);
        let cal =
            CalendarController::new(Container::Element(()), &(), options, date!(2024 - 09 - 15))
                .unwrap();
        (cal, log)
    }

    fn trip() -> EventRecord {
        EventRecord::all_day(date!(2024 - 09 - 24), date!(2024 - 10 - 05))
    }

    #[test]
    fn test_initial_state() {
        let (cal, log) = calendar(CalendarOptions::new());
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert_eq!(cal.grid().selected_day(), Some(15));
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_initial_selection_nothing() {
        let (cal, _) = calendar(CalendarOptions::new().initial_selection(InitialSelection::Nothing));
        assert_eq!(cal.get_selected_date(), None);
        assert_eq!(cal.grid().selected_day(), None);
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
    }

    #[test]
    fn test_initial_selection_elsewhere_keeps_today_view() {
        let (cal, _) = calendar(
            CalendarOptions::new()
                .initial_selection(InitialSelection::Date(date!(2024 - 12 - 25))),
        );
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 12 - 25)));
        assert_eq!(cal.grid().selected_day(), None);
    }

    #[test]
    fn test_unresolved_container_is_fatal() {
        let r = CalendarController::<()>::new(
            Container::Selector(String::from("#calendar")),
            &(),
            CalendarOptions::new(),
            date!(2024 - 09 - 15),
        );
        assert!(matches!(r, Err(CalendarError::ContainerNotFound(_))));
        let r = CalendarController::<()>::new(
            Container::resolver(|| Ok(None)),
            &(),
            CalendarOptions::new(),
            date!(2024 - 09 - 15),
        );
        assert!(matches!(r, Err(CalendarError::ContainerUnresolved)));
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.click_next_month().unwrap();
        assert_eq!(cal.view_date(), date!(2024 - 10 - 01));
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert_eq!(cal.grid().selected_day(), None);
        cal.click_prev_month().unwrap();
        assert_eq!(cal.grid().selected_day(), Some(15));
        assert_eq!(
            *log.borrow(),
            [
                Note::Month(date!(2024 - 10 - 01), 0),
                Note::Month(date!(2024 - 09 - 01), 0),
            ]
        );
    }

    #[test]
    fn test_navigation_across_years() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.set_selected_date(Some(date!(2024 - 12 - 03))).unwrap();
        cal.click_next_month().unwrap();
        assert_eq!((cal.view_year(), cal.view_month()), (2025, January));
        cal.click_prev_month().unwrap();
        cal.click_prev_month().unwrap();
        assert_eq!((cal.view_year(), cal.view_month()), (2024, November));
        cal.set_selected_date(Some(date!(2024 - 01 - 10))).unwrap();
        cal.click_prev_month().unwrap();
        assert_eq!((cal.view_year(), cal.view_month()), (2023, December));
    }

    #[test]
    fn test_click_day_keeps_view() {
        let (mut cal, log) = calendar(CalendarOptions::new().events(vec![trip()]));
        cal.click_day(24).unwrap();
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 24)));
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert_eq!(cal.grid().selected_day(), Some(24));
        assert_eq!(cal.days().iter().filter(|d| d.selected).count(), 1);
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::Day(24)));
        cal.click_day(24).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Note::Selected(Some(date!(2024 - 09 - 24)), 1),
                Note::Clicked(date!(2024 - 09 - 24), 1),
            ]
        );
    }

    #[test]
    fn test_click_invalid_day() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        assert!(matches!(
            cal.click_day(31),
            Err(CalendarError::InvalidDay { day: 31, .. })
        ));
        assert!(cal.click_day(0).is_err());
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_disabled_gates() {
        let (mut cal, log) = calendar(
            CalendarOptions::new()
                .disable_day_click(true)
                .disable_month_arrow_click(true)
                .disable_month_year_pickers(true),
        );
        cal.click_day(3).unwrap();
        cal.click_next_month().unwrap();
        cal.click_prev_month().unwrap();
        cal.click_month_label();
        cal.click_year_label();
        cal.pick_month(March).unwrap();
        cal.pick_year(2030).unwrap();
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        assert!(log.borrow().is_empty());
        cal.handle_next_month_button_click().unwrap();
        assert_eq!(cal.view_date(), date!(2024 - 10 - 01));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_set_selected_date_other_month() {
        let (mut cal, log) = calendar(CalendarOptions::new().events(vec![trip()]));
        cal.set_selected_date(Some(date!(2024 - 10 - 05))).unwrap();
        assert_eq!(cal.view_date(), date!(2024 - 10 - 01));
        assert_eq!(cal.grid().selected_day(), Some(5));
        assert_eq!(
            *log.borrow(),
            [
                Note::Selected(Some(date!(2024 - 10 - 05)), 1),
                Note::Month(date!(2024 - 10 - 01), 1),
            ]
        );
    }

    #[test]
    fn test_set_selected_date_same_month() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.set_selected_date(Some(date!(2024 - 09 - 02))).unwrap();
        assert_eq!(cal.grid().selected_day(), Some(2));
        assert_eq!(
            *log.borrow(),
            [Note::Selected(Some(date!(2024 - 09 - 02)), 0)]
        );
    }

    #[test]
    fn test_set_selected_date_none() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.click_next_month().unwrap();
        cal.click_next_month().unwrap();
        log.borrow_mut().clear();
        cal.set_selected_date(None).unwrap();
        assert_eq!(cal.get_selected_date(), None);
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert!(cal.days().iter().all(|d| !d.selected));
        assert_eq!(
            *log.borrow(),
            [
                Note::Selected(None, 0),
                Note::Month(date!(2024 - 09 - 01), 0),
            ]
        );
    }

    #[test]
    fn test_month_and_date_events() {
        let (mut cal, _) = calendar(CalendarOptions::new().events(vec![trip()]));
        assert_eq!(cal.get_month_events(), [trip()]);
        assert_eq!(cal.get_date_events(date!(2024 - 09 - 24)), [trip()]);
        assert_eq!(cal.get_date_events(date!(2024 - 10 - 05)), [trip()]);
        assert!(cal.get_date_events(date!(2024 - 09 - 23)).is_empty());
        cal.click_next_month().unwrap();
        assert_eq!(cal.get_month_events(), [trip()]);
        assert!(cal.event_index().day_has_event(5));
        assert!(!cal.event_index().day_has_event(6));
    }

    #[test]
    fn test_set_and_add_events() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        assert_eq!(cal.set_events_data(vec![trip()]), 1);
        assert!(cal.event_index().day_has_event(24));
        let lunch = EventRecord::all_day(date!(2024 - 09 - 03), date!(2024 - 09 - 03));
        assert_eq!(cal.add_events_data(vec![lunch.clone()]), 2);
        assert!(cal.event_index().day_has_event(3));
        assert_eq!(cal.get_events_data(), [trip(), lunch]);
        assert_eq!(cal.set_events_data(Vec::new()), 0);
        assert!(!cal.event_index().day_has_event(24));
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_events_are_copied() {
        let (mut cal, _) = calendar(CalendarOptions::new().events(vec![trip()]));
        let mut events = cal.get_events_data();
        events[0] = events[0].clone().with_color("red");
        assert_eq!(cal.get_events_data()[0].color(), None);
        cal.add_events_data(events);
        assert_eq!(cal.get_events_data()[0].color(), None);
        assert_eq!(cal.get_events_data()[1].color(), Some("red"));
    }

    #[test]
    fn test_month_picker() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.click_month_label();
        assert_eq!(cal.picker_status(), PickerStatus::Month);
        assert_eq!(
            cal.take_focus_request(),
            Some(FocusRequest::MonthOption(September))
        );
        assert_eq!(cal.highlighted_month_index(), 8);
        cal.click_month_label();
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        cal.click_month_label();
        cal.pick_month_index(1).unwrap();
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        assert_eq!(cal.view_date(), date!(2024 - 02 - 01));
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
        assert_eq!(*log.borrow(), [Note::Month(date!(2024 - 02 - 01), 0)]);
        assert!(matches!(
            cal.pick_month_index(12),
            Err(CalendarError::InvalidMonthIndex(12))
        ));
    }

    #[test]
    fn test_year_picker() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.click_year_label();
        assert_eq!(cal.picker_status(), PickerStatus::Year);
        let window = cal.year_window();
        assert_eq!(window.first(), 2020);
        assert_eq!(window.today_slot(), Some(4));
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::YearOption(4)));
        cal.scroll_year_window(Chevron::Right);
        assert_eq!(cal.year_window().first(), 2032);
        assert_eq!(cal.year_window().today_slot(), None);
        cal.pick_year(2035).unwrap();
        assert_eq!(cal.view_date(), date!(2035 - 09 - 01));
        assert_eq!(cal.year_picker().offset(), 12);
        assert_eq!(cal.year_picker().temporary_offset(), 0);
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        assert_eq!(*log.borrow(), [Note::Month(date!(2035 - 09 - 01), 0)]);
    }

    #[test]
    fn test_year_picker_browse_then_close() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.click_year_label();
        cal.scroll_year_window(Chevron::Left);
        assert_eq!(cal.year_window().first(), 2008);
        cal.click_year_label();
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
        assert_eq!(cal.year_window().first(), 2020);
    }

    #[test]
    fn test_switching_pickers() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.click_month_label();
        cal.click_year_label();
        assert_eq!(cal.picker_status(), PickerStatus::Year);
        cal.click_month_label();
        assert_eq!(cal.picker_status(), PickerStatus::Month);
        assert_eq!(cal.picker_mode(), PickerMode::Month);
        cal.click_next_month().unwrap();
        assert_eq!(cal.picker_status(), PickerStatus::Closed);
    }

    #[test]
    fn test_scroll_requires_open_year_picker() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.scroll_year_window(Chevron::Right);
        assert_eq!(cal.year_picker().temporary_offset(), 0);
    }

    #[test]
    fn test_month_navigation_shifts_year_window() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        // Window is 2020..=2031
        cal.pick_month(December).unwrap();
        cal.pick_year(2031).unwrap();
        assert_eq!(cal.year_picker().offset(), 0);
        cal.click_next_month().unwrap();
        assert_eq!((cal.view_year(), cal.view_month()), (2032, January));
        assert_eq!(cal.year_picker().offset(), 12);
        assert!(cal.year_window().contains(2032));
        cal.click_prev_month().unwrap();
        assert_eq!(cal.year_picker().offset(), 0);
        cal.pick_month(January).unwrap();
        cal.pick_year(2020).unwrap();
        cal.click_prev_month().unwrap();
        assert_eq!(cal.year_picker().offset(), -12);
        assert_eq!(cal.year_window().selected_slot(), Some(11));
    }

    #[test]
    fn test_far_jump_keeps_year_visible() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.set_selected_date(Some(date!(1987 - 06 - 01))).unwrap();
        assert!(cal.year_window().contains(1987));
        assert_eq!(cal.year_picker().offset() % 12, 0);
    }

    #[test]
    fn test_invalid_year() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        assert!(matches!(
            cal.pick_year(10000),
            Err(CalendarError::InvalidYear(10000))
        ));
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_end_of_time_navigation_is_atomic() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.set_selected_date(Some(date!(9999 - 12 - 31))).unwrap();
        log.borrow_mut().clear();
        assert!(matches!(
            cal.click_next_month(),
            Err(CalendarError::OutOfTime(_))
        ));
        assert_eq!(cal.view_date(), date!(9999 - 12 - 01));
        assert_eq!(cal.grid().selected_day(), Some(31));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_keyboard_navigation() {
        let (mut cal, log) = calendar(CalendarOptions::new());
        cal.handle_day_key(15, NavKey::Right).unwrap();
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::Day(16)));
        cal.handle_day_key(30, NavKey::Down).unwrap();
        assert_eq!(cal.view_date(), date!(2024 - 10 - 01));
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::Day(7)));
        assert_eq!(cal.take_focus_request(), None);
        assert_eq!(*log.borrow(), [Note::Month(date!(2024 - 10 - 01), 0)]);
        assert_eq!(cal.get_selected_date(), Some(date!(2024 - 09 - 15)));
    }

    #[test]
    fn test_keyboard_navigation_with_arrows_disabled() {
        let (mut cal, log) = calendar(CalendarOptions::new().disable_month_arrow_click(true));
        cal.handle_day_key(2, NavKey::Up).unwrap();
        assert_eq!(cal.view_date(), date!(2024 - 09 - 01));
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::Day(1)));
        cal.handle_day_key(29, NavKey::PageDown).unwrap();
        assert_eq!(cal.take_focus_request(), Some(FocusRequest::Day(30)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_today() {
        let (mut cal, _) = calendar(CalendarOptions::new());
        cal.set_today(date!(2025 - 01 - 01));
        assert_eq!(cal.today(), date!(2025 - 01 - 01));
        assert_eq!(cal.year_window().today_slot(), Some(4));
        assert!(cal.year_window().contains(2024));
    }
}
