use thiserror::Error;
use time::Month;

/// Returned when navigation would leave the range of dates representable by
/// [`time::Date`]
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar container {0:?} does not match any element")]
    ContainerNotFound(String),
    #[error("calendar container resolver returned no element")]
    ContainerUnresolved,
    #[error("calendar container resolver failed")]
    ContainerResolver(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
    #[error("{month} {year} has no day {day}")]
    InvalidDay { year: i32, month: Month, day: u8 },
    #[error("month index {0} is out of range (expected 0-11)")]
    InvalidMonthIndex(u8),
    #[error("weekday index {0} is out of range (expected 0-6)")]
    InvalidWeekdayIndex(u8),
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("expected {expected} custom {kind} labels, got {actual}")]
    CustomLabels {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}
