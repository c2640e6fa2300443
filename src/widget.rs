use crate::theme::{
    picker::{CURRENT_OPTION_STYLE, OPTION_STYLE, TODAY_OPTION_STYLE},
    BASE_STYLE, DEFAULT_BULLET_COLOR, EVENT_DAY_MODIFIER, HEADER_STYLE, OTHER_MONTH_STYLE,
    SELECTED_STYLE, STATUS_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use calpick::{Bullet, CalendarSize, CalendarView, CellKind, CellView, PickerView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Widget,
};
use std::iter::zip;

/// Number of lines taken up by the month header, the weekday row, and the
/// rule beneath them
const HEADER_LINES: u16 = 3;

/// Weeks in every month grid
const WEEKS: u16 = 6;

const DAYS_PER_WEEK: u16 = 7;

/// The month and year pickers lay their twelve options out in four rows of
/// three
const PICKER_COLUMNS: u16 = 3;
const PICKER_ROWS: u16 = 4;

/// Width of the text drawn for a single day, including the focus brackets
const DAY_TEXT_WIDTH: usize = 4;

const ACS_HLINE: char = '─';
const BULLET: &str = "•";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Geometry {
    /// Number of columns per day of week
    day_width: u16,
    /// Number of lines taken up by each week
    week_lines: u16,
}

impl Geometry {
    fn for_size(size: CalendarSize) -> Geometry {
        match size {
            // Room for a line of bullets beneath each day
            CalendarSize::Large => Geometry {
                day_width: 5,
                week_lines: 2,
            },
            CalendarSize::Small => Geometry {
                day_width: 4,
                week_lines: 1,
            },
        }
    }

    fn width(self) -> u16 {
        self.day_width * DAYS_PER_WEEK
    }

    fn grid_lines(self) -> u16 {
        self.week_lines * WEEKS
    }

    fn height(self) -> u16 {
        // Plus one for the status line
        HEADER_LINES + self.grid_lines() + 1
    }
}

/// Draws a [`CalendarView`] placed within its area according to the
/// calendar's container
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarWidget<'a> {
    view: &'a CalendarView,
    alignment: Alignment,
    focused_day: Option<u8>,
    picker_cursor: Option<usize>,
    status: Option<&'a str>,
}

impl<'a> CalendarWidget<'a> {
    pub(crate) fn new(view: &'a CalendarView, alignment: Alignment) -> Self {
        CalendarWidget {
            view,
            alignment,
            focused_day: None,
            picker_cursor: None,
            status: None,
        }
    }

    pub(crate) fn focused_day(mut self, day: Option<u8>) -> Self {
        self.focused_day = day;
        self
    }

    pub(crate) fn picker_cursor(mut self, cursor: Option<usize>) -> Self {
        self.picker_cursor = cursor;
        self
    }

    pub(crate) fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for CalendarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = Geometry::for_size(self.view.size);
        let flex = match self.alignment {
            Alignment::Left => Flex::Start,
            Alignment::Center => Flex::Center,
            Alignment::Right => Flex::End,
        };
        let [area] = Layout::horizontal([geometry.width()])
            .flex(flex)
            .areas(area);
        let [area] = Layout::vertical([geometry.height()])
            .flex(Flex::Start)
            .areas(area);
        buf.set_style(area, BASE_STYLE);
        let mut canvas = BufferCanvas::new(area, buf, geometry);
        let header = match &self.view.picker {
            None => format!("{} {}", self.view.month_label, self.view.year),
            Some(PickerView::Months { .. }) => self.view.year.to_string(),
            Some(PickerView::Years { window }) => format!("{}-{}", window.first(), window.last()),
        };
        canvas.draw_header(&header);
        canvas.draw_weekdays(&self.view.weekday_headers);
        match &self.view.picker {
            None => {
                for (week_no, week) in zip(0u16.., self.view.weeks()) {
                    for (col, cell) in zip(0u16.., week) {
                        let focused =
                            cell.kind == CellKind::Current && self.focused_day == Some(cell.day);
                        canvas.draw_day(week_no, col, cell, focused);
                    }
                }
            }
            Some(picker) => canvas.draw_picker(picker, self.picker_cursor),
        }
        if let Some(status) = self.status {
            canvas.draw_status(status);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    geometry: Geometry,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, geometry: Geometry) -> Self {
        Self {
            area,
            buf,
            geometry,
        }
    }

    fn draw_header(&mut self, label: &str) {
        let width = self.geometry.width();
        self.mvprint(0, 0, "<", HEADER_STYLE);
        let len = u16::try_from(Line::raw(label).width()).unwrap_or(u16::MAX);
        // Keep the chevrons visible when a custom label is too long
        self.mvprint(0, (width.saturating_sub(len) / 2).max(2), label, HEADER_STYLE);
        self.mvprint(0, width.saturating_sub(1), ">", HEADER_STYLE);
    }

    fn draw_weekdays(&mut self, labels: &[String]) {
        for (col, label) in zip(0u16.., labels) {
            // Right-aligned over the ones digit of the days below
            let label = label.chars().take(DAY_TEXT_WIDTH - 1).collect::<String>();
            self.mvprint(
                1,
                col * self.geometry.day_width,
                format!("{label:>3}"),
                WEEKDAY_STYLE,
            );
        }
        self.hline(2, 0, ACS_HLINE, self.geometry.width());
    }

    fn draw_day(&mut self, week_no: u16, col: u16, cell: &CellView, focused: bool) {
        let y = HEADER_LINES + week_no * self.geometry.week_lines;
        let x = col * self.geometry.day_width;
        let text = if focused {
            format!("[{:>2}]", cell.day)
        } else {
            format!(" {:>2} ", cell.day)
        };
        let mut style = if cell.kind != CellKind::Current {
            OTHER_MONTH_STYLE
        } else if cell.selected {
            SELECTED_STYLE
        } else if cell.today {
            TODAY_STYLE
        } else {
            BASE_STYLE
        };
        if self.geometry.week_lines > 1 {
            self.draw_bullets(y + 1, x, &cell.bullets);
        } else if !cell.bullets.is_empty() {
            style = style.add_modifier(EVENT_DAY_MODIFIER);
        }
        self.mvprint(y, x, text, style);
    }

    fn draw_bullets(&mut self, y: u16, x: u16, bullets: &[Bullet]) {
        for (i, bullet) in zip(0u16.., bullets) {
            let color = bullet
                .color
                .as_deref()
                .and_then(|c| c.parse::<Color>().ok())
                .unwrap_or(DEFAULT_BULLET_COLOR);
            self.mvprint(y, x + i, BULLET, BASE_STYLE.fg(color));
        }
    }

    fn draw_picker(&mut self, picker: &PickerView, cursor: Option<usize>) {
        let (options, highlighted, today) = match picker {
            PickerView::Months {
                options,
                highlighted,
                today,
            } => (options.clone(), Some(*highlighted), *today),
            PickerView::Years { window } => (
                window.years().iter().map(ToString::to_string).collect(),
                window.selected_slot(),
                window.today_slot(),
            ),
        };
        let slot_width = self.geometry.width() / PICKER_COLUMNS;
        let step = self.geometry.grid_lines() / PICKER_ROWS;
        for (i, option) in zip(0u16.., &options) {
            let index = usize::from(i);
            let text = if cursor == Some(index) {
                format!("[{option}]")
            } else {
                format!(" {option} ")
            };
            let style = if highlighted == Some(index) {
                CURRENT_OPTION_STYLE
            } else if today == Some(index) {
                TODAY_OPTION_STYLE
            } else {
                OPTION_STYLE
            };
            let len = u16::try_from(Line::raw(text.as_str()).width()).unwrap_or(u16::MAX);
            let y = HEADER_LINES + (i / PICKER_COLUMNS) * step + step / 2;
            let x = (i % PICKER_COLUMNS) * slot_width + slot_width.saturating_sub(len) / 2;
            self.mvprintn(y, x, text, slot_width, style);
        }
    }

    fn draw_status(&mut self, status: &str) {
        self.mvprint(
            HEADER_LINES + self.geometry.grid_lines(),
            0,
            status,
            STATUS_STYLE,
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        self.mvprintn(y, x, s, u16::MAX, style);
    }

    // Text is truncated at `max_width` columns and at the edge of the area.
    fn mvprintn<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, max_width: u16, style: Style) {
        if y < self.area.height && x < self.area.width {
            let width = (self.area.width - x).min(max_width);
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(width),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
