use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crate::widget::CalendarWidget;
use calpick::{
    CalendarController, CalendarError, CalendarOptions, Chevron, EventRecord, FocusRequest,
    NavKey, PickerStatus,
};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use time::Date;
use tracing::{debug, info};

/// Number of options in each row of the month and year pickers
const PICKER_COLUMNS: usize = 3;

const PICKER_OPTIONS: usize = 12;

/// The most recent notification from the calendar, shown beneath it
pub(crate) type StatusLine = Rc<RefCell<Option<String>>>;

/// Registers callbacks that log each notification and report it on the
/// status line
pub(crate) fn report_to(options: CalendarOptions, status: &StatusLine) -> CalendarOptions {
    let on_change = Rc::clone(status);
    let on_click = Rc::clone(status);
    let on_month = Rc::clone(status);
    options
        .on_selected_date_change(move |date: Option<Date>, events: &[EventRecord]| {
            let msg = match date {
                Some(date) => format!("Selected {date}: {}", describe(events)),
                None => String::from("Selection cleared"),
            };
            info!("{msg}");
            *on_change.borrow_mut() = Some(msg);
        })
        .on_selected_date_click(move |date: Date, events: &[EventRecord]| {
            let msg = format!("Clicked {date} again: {}", describe(events));
            info!("{msg}");
            *on_click.borrow_mut() = Some(msg);
        })
        .on_month_change(move |first: Date, events: &[EventRecord]| {
            let msg = format!(
                "Showing {} {}: {}",
                first.month(),
                first.year(),
                describe(events)
            );
            info!("{msg}");
            *on_month.borrow_mut() = Some(msg);
        })
}

fn describe(events: &[EventRecord]) -> String {
    match events.len() {
        0 => String::from("no events"),
        1 => String::from("1 event"),
        n => format!("{n} events"),
    }
}

#[derive(Debug)]
pub(crate) struct App {
    calendar: CalendarController<Alignment>,
    status: StatusLine,
    state: AppState,
    /// Day of the displayed month with keyboard focus
    focused_day: u8,
    /// Option of the open picker with keyboard focus
    picker_cursor: usize,
}

impl App {
    pub(crate) fn new(calendar: CalendarController<Alignment>, status: StatusLine) -> App {
        let focused_day = calendar
            .grid()
            .selected_day()
            .or_else(|| {
                let today = calendar.today();
                calendar
                    .grid()
                    .contains_date(today)
                    .then_some(today.day())
            })
            .unwrap_or(1);
        App {
            calendar,
            status,
            state: AppState::Calendar,
            focused_day,
            picker_cursor: 0,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.apply_focus();
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    /// Moves keyboard focus to wherever the calendar asked for it after the
    /// last intent
    fn apply_focus(&mut self) {
        match self.calendar.take_focus_request() {
            Some(FocusRequest::Day(day)) => self.focused_day = day,
            Some(FocusRequest::MonthOption(month)) => {
                self.picker_cursor = usize::from(u8::from(month)) - 1;
            }
            Some(FocusRequest::YearOption(slot)) => self.picker_cursor = slot,
            Some(FocusRequest::MonthLabel | FocusRequest::YearLabel) | None => (),
        }
        let len = self.calendar.grid().num_days_in_current_month();
        self.focused_day = self.focused_day.clamp(1, len);
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => {
                if self.calendar.picker_status() == PickerStatus::Closed {
                    self.handle_calendar_key(key)
                } else {
                    self.handle_picker_key(key)
                }
            }
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c @ '0'..='9') => c
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok())
                            .map_or(JumpToOutput::Invalid, |d| {
                                state.handle_input(JumpToInput::Digit(d))
                            }),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.select(Some(date))
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_calendar_key(&mut self, key: KeyCode) -> bool {
        let nav = match key {
            KeyCode::Left => Some(NavKey::Left),
            KeyCode::Right => Some(NavKey::Right),
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Home => Some(NavKey::Home),
            KeyCode::End => Some(NavKey::End),
            KeyCode::PageUp => Some(NavKey::PageUp),
            KeyCode::PageDown => Some(NavKey::PageDown),
            _ => None,
        };
        if let Some(nav) = nav {
            return outcome(self.calendar.handle_day_key(self.focused_day, nav));
        }
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                outcome(self.calendar.click_day(self.focused_day))
            }
            KeyCode::Char('p') => outcome(self.calendar.click_prev_month()),
            KeyCode::Char('n') => outcome(self.calendar.click_next_month()),
            KeyCode::Char('m') => {
                self.calendar.click_month_label();
                true
            }
            KeyCode::Char('y') => {
                self.calendar.click_year_label();
                true
            }
            KeyCode::Char('t') => {
                let today = self.calendar.today();
                self.focused_day = today.day();
                self.select(Some(today))
            }
            KeyCode::Char('x') => self.select(None),
            KeyCode::Char('g') => {
                self.state = AppState::Jumping(JumpToState::new());
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            _ => false,
        }
    }

    fn handle_picker_key(&mut self, key: KeyCode) -> bool {
        let status = self.calendar.picker_status();
        match key {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-3),
            KeyCode::Down => self.move_cursor(3),
            KeyCode::Enter | KeyCode::Char(' ') => match status {
                PickerStatus::Month => u8::try_from(self.picker_cursor)
                    .is_ok_and(|i| outcome(self.calendar.pick_month_index(i))),
                PickerStatus::Year => self
                    .calendar
                    .year_window()
                    .year_at(self.picker_cursor)
                    .is_some_and(|year| outcome(self.calendar.pick_year(year))),
                PickerStatus::Closed => false,
            },
            KeyCode::Char('[') if status == PickerStatus::Year => {
                self.calendar.scroll_year_window(Chevron::Left);
                true
            }
            KeyCode::Char(']') if status == PickerStatus::Year => {
                self.calendar.scroll_year_window(Chevron::Right);
                true
            }
            KeyCode::Char('m') => {
                self.calendar.click_month_label();
                true
            }
            KeyCode::Char('y') => {
                self.calendar.click_year_label();
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.calendar.close_picker();
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            _ => false,
        }
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        match self.picker_cursor.checked_add_signed(delta) {
            Some(cursor) if cursor < PICKER_OPTIONS => {
                // Left and right stay within the row
                if delta.unsigned_abs() < PICKER_COLUMNS
                    && cursor / PICKER_COLUMNS != self.picker_cursor / PICKER_COLUMNS
                {
                    return false;
                }
                self.picker_cursor = cursor;
                true
            }
            _ => false,
        }
    }

    fn select(&mut self, date: Option<Date>) -> bool {
        debug!(selected = ?date, "Setting selection from keyboard");
        let ok = outcome(self.calendar.set_selected_date(date));
        if let Some(date) = date {
            self.focused_day = date.day();
        }
        ok
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

fn outcome(r: Result<(), CalendarError>) -> bool {
    match r {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "Calendar rejected input");
            false
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let view = self.calendar.render();
        let status = self.status.borrow();
        let picker_open = view.picker.is_some();
        CalendarWidget::new(&view, *self.calendar.container())
            .focused_day((!picker_open).then_some(self.focused_day))
            .picker_cursor(picker_open.then_some(self.picker_cursor))
            .status(status.as_deref())
            .render(area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
