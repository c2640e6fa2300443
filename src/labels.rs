//! Month and weekday names shown in the header, the weekday row, and the
//! month picker

use crate::error::CalendarError;
use crate::util::{MonthExt, WeekdayExt, DAYS_IN_WEEK};
use std::str::FromStr;
use thiserror::Error;
use time::{Month, Weekday};

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekdayDisplayType {
    /// `S M T W T F S`
    #[default]
    Short,
    /// `Sun Mon Tue …`
    LongLower,
    /// `SUN MON TUE …`
    LongUpper,
}

impl FromStr for WeekdayDisplayType {
    type Err = ParseDisplayTypeError;

    fn from_str(s: &str) -> Result<WeekdayDisplayType, ParseDisplayTypeError> {
        match s {
            "short" => Ok(WeekdayDisplayType::Short),
            "long-lower" => Ok(WeekdayDisplayType::LongLower),
            "long-upper" => Ok(WeekdayDisplayType::LongUpper),
            _ => Err(ParseDisplayTypeError),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MonthDisplayType {
    /// `September`
    #[default]
    Long,
    /// `Sep`
    Short,
}

impl FromStr for MonthDisplayType {
    type Err = ParseDisplayTypeError;

    fn from_str(s: &str) -> Result<MonthDisplayType, ParseDisplayTypeError> {
        match s {
            "long" => Ok(MonthDisplayType::Long),
            "short" => Ok(MonthDisplayType::Short),
            _ => Err(ParseDisplayTypeError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid display type")]
pub struct ParseDisplayTypeError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels {
    months: [String; 12],
    month_options: [String; 12],
    // Indexed from Sunday
    weekdays: [String; 7],
}

impl Labels {
    /// Builds the label set.  Custom month values must number exactly 12 and
    /// custom weekday values exactly 7 (starting with Sunday); custom values
    /// are used verbatim, ignoring the corresponding display type.
    pub fn new(
        month_display: MonthDisplayType,
        weekday_display: WeekdayDisplayType,
        custom_months: Option<Vec<String>>,
        custom_weekdays: Option<Vec<String>>,
    ) -> Result<Labels, CalendarError> {
        let (months, month_options) = match custom_months {
            Some(values) => {
                let months = exact::<12>(values, "month")?;
                (months.clone(), months)
            }
            None => {
                let short = std::array::from_fn(|i| MONTH_NAMES[i][..3].to_owned());
                let months = match month_display {
                    MonthDisplayType::Long => MONTH_NAMES.map(String::from),
                    MonthDisplayType::Short => short.clone(),
                };
                (months, short)
            }
        };
        let weekdays = match custom_weekdays {
            Some(values) => exact::<7>(values, "weekday")?,
            None => WEEKDAY_NAMES.map(|name| match weekday_display {
                WeekdayDisplayType::Short => name[..1].to_owned(),
                WeekdayDisplayType::LongLower => name.to_owned(),
                WeekdayDisplayType::LongUpper => name.to_uppercase(),
            }),
        };
        Ok(Labels {
            months,
            month_options,
            weekdays,
        })
    }

    /// Name of the month as shown in the calendar header
    pub fn month(&self, month: Month) -> &str {
        &self.months[usize::from(month.index0())]
    }

    /// Name of the month as shown in the month picker
    pub fn month_option(&self, month: Month) -> &str {
        &self.month_options[usize::from(month.index0())]
    }

    pub fn month_options(&self) -> &[String; 12] {
        &self.month_options
    }

    pub fn weekday(&self, weekday: Weekday) -> &str {
        &self.weekdays[usize::from(weekday.index0())]
    }

    /// The weekday row, beginning with `start`
    pub fn weekday_headers(&self, start: Weekday) -> Vec<&str> {
        let first = usize::from(start.index0());
        let days = usize::from(DAYS_IN_WEEK);
        (0..days)
            .map(|i| self.weekdays[(first + i) % days].as_str())
            .collect()
    }
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            months: MONTH_NAMES.map(String::from),
            month_options: std::array::from_fn(|i| MONTH_NAMES[i][..3].to_owned()),
            weekdays: WEEKDAY_NAMES.map(|name| name[..1].to_owned()),
        }
    }
}

fn exact<const N: usize>(
    values: Vec<String>,
    kind: &'static str,
) -> Result<[String; N], CalendarError> {
    let actual = values.len();
    <[String; N]>::try_from(values).map_err(|_| CalendarError::CustomLabels {
        kind,
        expected: N,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month::*;
    use time::Weekday::*;

    #[test]
    fn test_default_labels() {
        let labels = Labels::default();
        assert_eq!(labels.month(September), "September");
        assert_eq!(labels.month_option(September), "Sep");
        assert_eq!(
            labels.weekday_headers(Sunday),
            ["S", "M", "T", "W", "T", "F", "S"]
        );
        assert_eq!(
            Labels::new(
                MonthDisplayType::default(),
                WeekdayDisplayType::default(),
                None,
                None
            )
            .unwrap(),
            labels
        );
    }

    #[test]
    fn test_display_types() {
        let labels = Labels::new(
            MonthDisplayType::Short,
            WeekdayDisplayType::LongUpper,
            None,
            None,
        )
        .unwrap();
        assert_eq!(labels.month(May), "May");
        assert_eq!(labels.month(December), "Dec");
        assert_eq!(labels.weekday(Wednesday), "WED");
        let labels = Labels::new(
            MonthDisplayType::Long,
            WeekdayDisplayType::LongLower,
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            labels.weekday_headers(Monday),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_custom_values() {
        let months = [
            "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
        ]
        .map(String::from)
        .to_vec();
        let weekdays = ["Do", "Lu", "Ma", "Mi", "Ju", "Vi", "Sa"]
            .map(String::from)
            .to_vec();
        let labels = Labels::new(
            MonthDisplayType::Long,
            WeekdayDisplayType::Short,
            Some(months),
            Some(weekdays),
        )
        .unwrap();
        assert_eq!(labels.month(April), "Abr");
        assert_eq!(labels.month_option(August), "Ago");
        assert_eq!(labels.weekday_headers(Saturday)[..2], ["Sa", "Do"]);
    }

    #[test]
    fn test_custom_values_wrong_length() {
        let r = Labels::new(
            MonthDisplayType::Long,
            WeekdayDisplayType::Short,
            None,
            Some(vec![String::from("Su")]),
        );
        assert!(matches!(
            r,
            Err(CalendarError::CustomLabels {
                kind: "weekday",
                expected: 7,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_parse_display_types() {
        assert_eq!(
            "long-lower".parse::<WeekdayDisplayType>(),
            Ok(WeekdayDisplayType::LongLower)
        );
        assert_eq!("short".parse::<MonthDisplayType>(), Ok(MonthDisplayType::Short));
        assert_eq!(
            "tiny".parse::<MonthDisplayType>(),
            Err(ParseDisplayTypeError)
        );
    }
}
