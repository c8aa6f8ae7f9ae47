use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static COMMANDS: &[&str] = &[
    "LEFT, RIGHT, h, l   Move one day",
    "UP, DOWN, k, j      Move one week",
    "ENTER, SPACE        Pick the date under the cursor",
    "n, PAGE DOWN        Next month",
    "p, PAGE UP          Previous month",
    "N, P                Next/previous year",
    "g                   Choose month and year",
    "0, HOME             Jump to today",
    "c                   Clear the selection",
    "?                   Show this help",
    "q, ESC              Quit",
];

static PRESET_COMMANDS: &[&str] = &[
    "7                   Select the last 7 days",
    "3                   Select the last 30 days",
];

static FOOTER: &[&str] = &[
    "",
    "Weekends cannot be picked.  Days can also be",
    "picked by clicking them.",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    pub(crate) style: Style,
    pub(crate) show_presets: bool,
}

impl Help {
    fn text(self) -> Text<'static> {
        let presets: &[&str] = if self.show_presets {
            PRESET_COMMANDS
        } else {
            &[]
        };
        COMMANDS
            .iter()
            .chain(presets)
            .chain(FOOTER)
            .map(|&s| Line::raw(s))
            .collect()
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
