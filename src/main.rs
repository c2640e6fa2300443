mod app;
mod help;
mod jumpto;
mod theme;
mod widget;
use crate::app::{report_to, App, StatusLine};
use anyhow::Context;
use calpick::{
    events::parse_events_json, util::weekday_from_index, BulletMode, CalendarController,
    CalendarOptions, CalendarSize, Container, ContainerLookup, EventRecord, InitialSelection,
    MonthDisplayType, WeekdayDisplayType,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{layout::Alignment, DefaultTerminal};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{macros::format_description, Date, OffsetDateTime, Weekday};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    selection: InitialSelection,
    start_weekday: Weekday,
    events: Option<PathBuf>,
    bullets: BulletMode,
    size: CalendarSize,
    weekdays: WeekdayDisplayType,
    months: MonthDisplayType,
    align: String,
    no_pickers: bool,
    no_day_click: bool,
    no_arrows: bool,
    log: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            selection: InitialSelection::Today,
            start_weekday: Weekday::Sunday,
            events: None,
            bullets: BulletMode::default(),
            size: CalendarSize::default(),
            weekdays: WeekdayDisplayType::default(),
            months: MonthDisplayType::default(),
            align: String::from("center"),
            no_pickers: false,
            no_day_click: false,
            no_arrows: false,
            log: None,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        let mut got_date = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("start-weekday") => {
                    opts.start_weekday = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Short('e') | Arg::Long("events") => {
                    opts.events = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("bullets") => opts.bullets = parser.value()?.parse()?,
                Arg::Short('s') | Arg::Long("size") => opts.size = parser.value()?.parse()?,
                Arg::Long("weekdays") => opts.weekdays = parser.value()?.parse()?,
                Arg::Long("months") => opts.months = parser.value()?.parse()?,
                Arg::Short('a') | Arg::Long("align") => opts.align = parser.value()?.string()?,
                Arg::Long("no-pickers") => opts.no_pickers = true,
                Arg::Long("no-day-click") => opts.no_day_click = true,
                Arg::Long("no-arrows") => opts.no_arrows = true,
                Arg::Long("log") => opts.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if !got_date => {
                    let value = value.string()?;
                    opts.selection = if value == "none" {
                        InitialSelection::Nothing
                    } else {
                        match Date::parse(&value, format_description!("[year]-[month]-[day]")) {
                            Ok(d) => InitialSelection::Date(d),
                            Err(e) => {
                                return Err(lexopt::Error::ParsingFailed {
                                    value,
                                    error: Box::new(e),
                                })
                            }
                        }
                    };
                    got_date = true;
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // Must happen before the log writer thread is spawned, as the
                // local offset cannot be determined once the process is
                // multithreaded
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _guard = opts.log.as_deref().map(init_logging).transpose()?;
                let events = match opts.events.as_deref() {
                    Some(path) => load_events(path)?,
                    None => Vec::new(),
                };
                let status = StatusLine::default();
                let options = CalendarOptions::new()
                    .calendar_size(opts.size)
                    .start_weekday(opts.start_weekday)
                    .weekday_display(opts.weekdays)
                    .month_display(opts.months)
                    .events(events)
                    .bullet_mode(opts.bullets)
                    .disable_month_year_pickers(opts.no_pickers)
                    .disable_day_click(opts.no_day_click)
                    .disable_month_arrow_click(opts.no_arrows)
                    .initial_selection(opts.selection);
                let calendar = CalendarController::new(
                    Container::Selector(opts.align),
                    &ScreenSlots,
                    report_to(options, &status),
                    today,
                )
                .context("failed to set up calendar")?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(calendar, status).run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: calpick [<options>] [YYYY-MM-DD|none]");
                println!();
                println!("Terminal month calendar for picking a date, with event bullets");
                println!();
                println!("Options:");
                println!("  -a, --align <left|center|right>");
                println!("                    Where to draw the calendar [default: center]");
                println!("      --bullets <multiple|single>");
                println!("                    How many bullets to draw per event day");
                println!("  -e, --events <FILE>");
                println!("                    Read events from a JSON array in FILE");
                println!("      --log <FILE>  Write logs to FILE (filtered by RUST_LOG)");
                println!("      --months <long|short>");
                println!("                    Style of month names in the header");
                println!("      --no-arrows   Disable moving between months");
                println!("      --no-day-click");
                println!("                    Disable selecting days");
                println!("      --no-pickers  Disable the month & year pickers");
                println!("  -s, --size <small|large>");
                println!("                    Calendar size [default: large]");
                println!("  -w, --start-weekday <DAY>");
                println!("                    First day of the week [default: sunday]");
                println!("      --weekdays <short|long-lower|long-upper>");
                println!("                    Style of weekday names");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// Places named by `--align`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ScreenSlots;

impl ContainerLookup<Alignment> for ScreenSlots {
    fn query(&self, selector: &str) -> Option<Alignment> {
        match selector {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday: {0:?}")]
struct ParseWeekdayError(String);

fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let index = match s.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => 0,
        "mon" | "monday" => 1,
        "tue" | "tuesday" => 2,
        "wed" | "wednesday" => 3,
        "thu" | "thursday" => 4,
        "fri" | "friday" => 5,
        "sat" | "saturday" => 6,
        other => other
            .parse::<u8>()
            .map_err(|_| ParseWeekdayError(s.to_owned()))?,
    };
    weekday_from_index(index).map_err(|_| ParseWeekdayError(s.to_owned()))
}

fn load_events(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events = parse_events_json(&src)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;
    tracing::info!(path = %path.display(), events = events.len(), "Loaded events");
    Ok(events)
}

fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(guard)
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
