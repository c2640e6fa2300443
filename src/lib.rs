//! Date picker engine: a six-week month grid with a single selected date,
//! date-range events drawn as bullets, month/year pickers, and keyboard
//! navigation.
//!
//! The engine draws nothing itself.  A host resolves a [`Container`], creates
//! a [`CalendarController`], forwards user intents to it, and draws the
//! [`CalendarView`] returned by [`CalendarController::render()`].
//!
//! ```
//! use calpick::{CalendarController, CalendarOptions, Container, EventRecord};
//! use time::macros::date;
//!
//! let options = CalendarOptions::new().events(vec![EventRecord::parse(
//!     "2024-09-24",
//!     "2024-10-05",
//! )?]);
//! let mut calendar =
//!     CalendarController::new(Container::Element(()), &(), options, date!(2024 - 09 - 15))?;
//! calendar.click_day(24)?;
//! assert_eq!(calendar.get_date_events(date!(2024 - 10 - 05)).len(), 1);
//! assert_eq!(calendar.render().cells.len(), 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod container;
pub mod controller;
pub mod error;
pub mod events;
pub mod grid;
pub mod index;
pub mod keyboard;
pub mod labels;
pub mod options;
pub mod render;
pub mod selection;
pub mod util;
pub mod view;
pub mod yearpicker;
pub use crate::container::{Container, ContainerLookup};
pub use crate::controller::{CalendarController, FocusRequest, PickerMode, PickerStatus};
pub use crate::error::{CalendarError, OutOfTimeError};
pub use crate::events::{EventError, EventRecord};
pub use crate::grid::{compute_grid, CalendarDay, CellKind, GridCell, MonthGrid, GRID_CELLS};
pub use crate::index::{Bullet, BulletMode, EventIndex};
pub use crate::keyboard::NavKey;
pub use crate::labels::{Labels, MonthDisplayType, WeekdayDisplayType};
pub use crate::options::{CalendarOptions, CalendarSize, InitialSelection};
pub use crate::render::{CalendarView, CellView, PickerView};
pub use crate::selection::SelectionState;
pub use crate::view::ViewState;
pub use crate::yearpicker::{Chevron, YearPickerWindow, YearWindow};
