use super::state::{GridLayout, PickerState, PRESETS};
use crate::dates::{format_date, is_weekend, weekends_in_range};
use crate::selection::Selection;
use crate::theme::{
    HEADER_STYLE, PREVIEW_STYLE, SELECTED_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
    WEEKEND_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Number of columns taken up by each day, brackets included
const CELL_WIDTH: u16 = 4;

/// Number of columns between the left edges of consecutive days
const DAY_WIDTH: u16 = CELL_WIDTH + 1;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

/// Line on which the first week is drawn
const FIRST_WEEK_LINE: u16 = 3;

/// Lines reserved for weeks so that the rest of the calendar does not move
/// around between months
const MAX_WEEKS: u16 = 6;

const PRESETS_LINE: u16 = FIRST_WEEK_LINE + MAX_WEEKS + 1;

/// Columns between quick-range buttons
const PRESET_GUTTER: u16 = 3;

const ACS_HLINE: char = '─';

/// Draws the month currently shown by a [`PickerState`]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl StatefulWidget for Calendar {
    type State = PickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = MAIN_WIDTH.min(area.width);
        let area = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        let view = state.view();
        let weeks = view.weeks();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&format!("{} {}", view.month(), view.year()));
        canvas.draw_header();
        for (i, week) in std::iter::zip(0u16.., &weeks) {
            for (j, date) in std::iter::zip(0u16.., week) {
                if let Some(date) = *date {
                    canvas.draw_day(i, j, day_text(state, date), day_style(state, date));
                }
            }
        }
        let mut presets = Vec::new();
        let mut status_line = PRESETS_LINE;
        if state.show_presets() {
            let mut x = 0;
            for (key, days, label) in PRESETS {
                let text = format!("[{key}] {label}");
                let button_width = u16::try_from(text.len()).unwrap_or(u16::MAX);
                canvas.mvprint(PRESETS_LINE, x, &text, None);
                presets.push((canvas.translate(PRESETS_LINE, x, button_width), days));
                x = x.saturating_add(button_width + PRESET_GUTTER);
            }
            status_line += 1;
        }
        for (i, line) in std::iter::zip(0u16.., status_text(state)) {
            canvas.mvprint(status_line + i, 0, line, None);
        }
        let drawn = u16::try_from(weeks.len()).unwrap_or(MAX_WEEKS);
        let days = Rect {
            height: drawn,
            ..canvas.translate(FIRST_WEEK_LINE, 0, area.width)
        };
        state.layout = Some(GridLayout {
            days: days.intersection(area),
            cell_width: CELL_WIDTH,
            cell_stride: DAY_WIDTH,
            weeks,
            presets,
        });
    }
}

fn day_text(state: &PickerState, date: Date) -> String {
    if date == state.cursor() {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    }
}

fn day_style(state: &PickerState, date: Date) -> Style {
    let selector = state.selector();
    let mut style = if selector.is_selected(date) {
        SELECTED_STYLE
    } else if selector.in_preview(date) {
        PREVIEW_STYLE
    } else if is_weekend(date) {
        WEEKEND_STYLE
    } else {
        WEEKDAY_STYLE
    };
    if date == state.today {
        style = style.patch(TODAY_STYLE);
    }
    style
}

fn status_text(state: &PickerState) -> [String; 2] {
    match state.selector().selection() {
        Selection::Empty => [String::from("Pick a start date"), String::new()],
        Selection::PartialStart(start) => [
            format!("Start {}", format_date(start)),
            String::from("Pick an end date"),
        ],
        Selection::Complete(range) => [
            format!(
                "Selected {} to {}",
                format_date(range.start()),
                format_date(range.end())
            ),
            format!(
                "Weekends inside: {}",
                weekends_in_range(range.start(), range.end()).len()
            ),
        ],
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let len = u16::try_from(title.len()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(len) / 2;
        self.mvprint(TITLE_LINE, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        for (i, label) in std::iter::zip(0u16.., WEEKDAY_LABELS) {
            self.mvprint(
                HEADER_LINE,
                DAY_WIDTH * i + 1,
                label,
                Some(HEADER_STYLE),
            );
        }
        self.hline(HEADER_LINE + 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, day_no: u16, s: String, style: Style) {
        self.mvprint(FIRST_WEEK_LINE + week_no, DAY_WIDTH * day_no, s, Some(style));
    }

    /// Returns the buffer area of `width` columns starting at line `y` and
    /// column `x` of the canvas
    fn translate(&self, y: u16, x: u16, width: u16) -> Rect {
        Rect {
            x: x + self.area.x,
            y: y + self.area.y,
            width,
            height: 1,
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
