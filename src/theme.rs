use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE;

pub(crate) const WEEKEND_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

pub(crate) const PREVIEW_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub(crate) const TODAY_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

pub(crate) mod goto {
    use super::*;

    pub(crate) const FOCUSED_FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const ARROW_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
