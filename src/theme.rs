use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);

/// Used for days with events when the calendar is too small for bullets
pub(crate) const EVENT_DAY_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) const DEFAULT_BULLET_COLOR: Color = Color::LightCyan;

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod picker {
    use super::*;

    pub(crate) const OPTION_STYLE: Style = BASE_STYLE;

    pub(crate) const CURRENT_OPTION_STYLE: Style = SELECTED_STYLE;

    pub(crate) const TODAY_OPTION_STYLE: Style = TODAY_STYLE;
}

pub(crate) mod help {
    use super::*;

    pub(crate) const KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
