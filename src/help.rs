use crate::theme::{help::KEY_STYLE, BASE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Keys and what they do, in the order shown
static BINDINGS: &[(&str, &str)] = &[
    ("ARROWS", "Move between days"),
    ("HOME, END", "Start/end of week"),
    ("PAGE UP/DOWN", "Previous/next month"),
    ("ENTER, SPACE", "Select day"),
    ("p, n", "Previous/next month"),
    ("m, y", "Month/year picker"),
    ("[, ]", "Scroll year picker"),
    ("t", "Select today"),
    ("x", "Clear selection"),
    ("g", "Input date to jump to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const FOOTER: &str = "Press the Any Key to dismiss.";

/// Spaces between the key column and the description column
const GUTTER: usize = 4;

/// Overlay listing the key bindings, centered over the calendar
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn lines() -> Vec<Line<'static>> {
        let key_width = BINDINGS
            .iter()
            .map(|&(keys, _)| keys.len())
            .max()
            .unwrap_or_default()
            + GUTTER;
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!("{keys:key_width$}"), KEY_STYLE),
                    Span::raw(desc),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(FOOTER));
        lines
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = Help::lines();
        let text_width = lines.iter().map(Line::width).max().unwrap_or_default();
        // Two extra rows and columns for the border
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text_width)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        // Leave a blank column either side of the border
        let margin = Rect {
            x: popup.x.saturating_sub(1),
            width: popup.width.saturating_add(2),
            ..popup
        }
        .intersection(area);
        Clear.render(margin, buf);
        buf.set_style(margin, BASE_STYLE);
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(popup, buf);
    }
}
