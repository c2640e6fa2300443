//! A plain description of everything the host needs to draw, derived from the
//! controller's state.  Hosts decide for themselves whether to redraw fully or
//! incrementally.

use crate::controller::{CalendarController, PickerStatus};
use crate::grid::{CellKind, GRID_CELLS};
use crate::index::Bullet;
use crate::options::CalendarSize;
use crate::util::{MonthExt, DAYS_IN_WEEK};
use crate::yearpicker::YearWindow;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarView {
    pub size: CalendarSize,
    pub month_label: String,
    pub year: i32,
    /// Seven labels, beginning with the configured start weekday
    pub weekday_headers: Vec<String>,
    /// Exactly 42 cells, row by row
    pub cells: Vec<CellView>,
    pub picker: Option<PickerView>,
}

impl CalendarView {
    pub fn weeks(&self) -> impl Iterator<Item = &[CellView]> + '_ {
        self.cells.chunks(usize::from(DAYS_IN_WEEK))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellView {
    pub kind: CellKind,
    pub day: u8,
    pub selected: bool,
    pub today: bool,
    /// Always empty for days outside the displayed month
    pub bullets: Vec<Bullet>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickerView {
    Months {
        options: Vec<String>,
        /// Index of the displayed month
        highlighted: usize,
        /// Index of the current month, if the displayed year is this year
        today: Option<usize>,
    },
    Years {
        window: YearWindow,
    },
}

impl<T> CalendarController<T> {
    pub fn render(&self) -> CalendarView {
        let grid = self.grid();
        let index = self.event_index();
        let today = self.today();
        let today_day = grid.contains_date(today).then_some(today.day());
        let mut cells = Vec::with_capacity(GRID_CELLS);
        for cell in grid.cells() {
            let current = cell.kind == CellKind::Current;
            cells.push(CellView {
                kind: cell.kind,
                day: cell.day,
                selected: current && grid.selected_day() == Some(cell.day),
                today: current && today_day == Some(cell.day),
                bullets: if current {
                    index.bullets(cell.day, self.bullet_mode())
                } else {
                    Vec::new()
                },
            });
        }
        let picker = match self.picker_status() {
            PickerStatus::Closed => None,
            PickerStatus::Month => Some(PickerView::Months {
                options: self.labels().month_options().to_vec(),
                highlighted: self.highlighted_month_index(),
                today: (self.view_year() == today.year())
                    .then_some(usize::from(today.month().index0())),
            }),
            PickerStatus::Year => Some(PickerView::Years {
                window: self.year_window(),
            }),
        };
        CalendarView {
            size: self.size(),
            month_label: self.labels().month(self.view_month()).to_owned(),
            year: self.view_year(),
            weekday_headers: self
                .labels()
                .weekday_headers(self.start_weekday())
                .into_iter()
                .map(String::from)
                .collect(),
            cells,
            picker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::events::EventRecord;
    use crate::index::BulletMode;
    use crate::options::CalendarOptions;
    use time::macros::date;
    use time::Weekday::Monday;

    fn calendar(options: CalendarOptions) -> CalendarController<()> {
        CalendarController::new(Container::Element(()), &(), options, date!(2024 - 09 - 15))
            .unwrap()
    }

    #[test]
    fn test_render_grid() {
        let events = (0..7)
            .map(|i| {
                EventRecord::all_day(date!(2024 - 09 - 10), date!(2024 - 09 - 10))
                    .with_color(format!("c{i}"))
            })
            .collect();
        let mut cal = calendar(CalendarOptions::new().events(events));
        cal.click_day(20).unwrap();
        let view = cal.render();
        assert_eq!(view.month_label, "September");
        assert_eq!(view.year, 2024);
        assert_eq!(view.weekday_headers, ["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(view.cells.len(), 42);
        assert_eq!(view.weeks().count(), 6);
        assert_eq!(view.cells.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(view.cells.iter().filter(|c| c.today).count(), 1);
        let twentieth = &view.cells[19];
        assert_eq!((twentieth.kind, twentieth.day), (CellKind::Current, 20));
        assert!(twentieth.selected);
        assert!(view.cells[14].today);
        assert_eq!(view.cells[9].bullets.len(), 5);
        assert!(view.cells[10].bullets.is_empty());
        assert_eq!(view.picker, None);
    }

    #[test]
    fn test_render_single_bullet() {
        let events = vec![
            EventRecord::all_day(date!(2024 - 09 - 10), date!(2024 - 09 - 10)).with_color("red"),
            EventRecord::all_day(date!(2024 - 09 - 10), date!(2024 - 09 - 10)).with_color("blue"),
        ];
        let cal = calendar(
            CalendarOptions::new()
                .events(events)
                .bullet_mode(BulletMode::Single),
        );
        let view = cal.render();
        assert_eq!(view.cells[9].bullets.len(), 1);
        assert_eq!(view.cells[9].bullets[0].color.as_deref(), Some("red"));
    }

    #[test]
    fn test_render_leading_cells_have_no_markers() {
        let cal = calendar(
            CalendarOptions::new()
                .start_weekday(Monday)
                .events(vec![EventRecord::all_day(
                    date!(2024 - 08 - 26),
                    date!(2024 - 09 - 02),
                )]),
        );
        let view = cal.render();
        assert_eq!(view.weekday_headers[0], "M");
        let leading = &view.cells[..6];
        assert!(leading.iter().all(|c| c.kind == CellKind::Leading));
        assert!(leading.iter().all(|c| c.bullets.is_empty() && !c.selected));
        assert_eq!(leading[0].day, 26);
        assert_eq!(view.cells[6].bullets.len(), 1);
        assert_eq!(view.cells[7].bullets.len(), 1);
        assert!(view.cells[8].bullets.is_empty());
    }

    #[test]
    fn test_render_selection_off_screen() {
        let mut cal = calendar(CalendarOptions::new());
        cal.click_next_month().unwrap();
        let view = cal.render();
        assert!(view.cells.iter().all(|c| !c.selected && !c.today));
        assert_eq!(view.month_label, "October");
    }

    #[test]
    fn test_render_pickers() {
        let mut cal = calendar(CalendarOptions::new());
        cal.click_month_label();
        let Some(PickerView::Months {
            options,
            highlighted,
            today,
        }) = cal.render().picker
        else {
            panic!("month picker should be open");
        };
        assert_eq!(options.len(), 12);
        assert_eq!(options[0], "Jan");
        assert_eq!(highlighted, 8);
        assert_eq!(today, Some(8));
        cal.click_year_label();
        let Some(PickerView::Years { window }) = cal.render().picker else {
            panic!("year picker should be open");
        };
        assert_eq!(window.first(), 2020);
        assert_eq!(window.today_slot(), Some(4));
    }
}
