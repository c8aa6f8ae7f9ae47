use crate::month::MonthView;
use crate::theme::{
    goto::{ARROW_STYLE, FOCUSED_FIELD_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::ops::RangeInclusive;
use time::Month;

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 9;

/// Popup for choosing the displayed month and year directly
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * .................
     * .┌─── Go To ───┐.
     * .│             │.
     * .│< September >│.
     * .│  < 2024 >   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Month,
    Year,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GoToState {
    field: Field,
    month: Month,
    year: i32,
    years: RangeInclusive<i32>,
}

impl GoToState {
    /// Start out on the displayed month, offering the years around the
    /// displayed year
    pub(crate) fn new(view: MonthView) -> GoToState {
        GoToState {
            field: Field::Month,
            month: view.month(),
            year: view.year(),
            years: view.year_choices(),
        }
    }

    fn to_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.field_line(Field::Month, self.month.to_string()),
            self.field_line(Field::Year, self.year.to_string()),
            Line::styled("", BASE_STYLE),
            Line::from(Span::styled("[ENTER]", BASE_STYLE)),
        ])
        .centered()
    }

    fn field_line(&self, field: Field, value: String) -> Line<'static> {
        let style = if self.field == field {
            FOCUSED_FIELD_STYLE
        } else {
            BASE_STYLE
        };
        Line::from_iter([
            Span::styled("< ", ARROW_STYLE),
            Span::styled(value, style),
            Span::styled(" >", ARROW_STYLE),
        ])
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match (input, self.field) {
            (GoToInput::SwitchField, Field::Month) => {
                self.field = Field::Year;
                GoToOutput::Ok
            }
            (GoToInput::SwitchField, Field::Year) => {
                self.field = Field::Month;
                GoToOutput::Ok
            }
            (GoToInput::Previous, Field::Month) if self.month != Month::January => {
                self.month = self.month.previous();
                GoToOutput::Ok
            }
            (GoToInput::Next, Field::Month) if self.month != Month::December => {
                self.month = self.month.next();
                GoToOutput::Ok
            }
            (GoToInput::Previous, Field::Year) if self.year > *self.years.start() => {
                self.year -= 1;
                GoToOutput::Ok
            }
            (GoToInput::Next, Field::Year) if self.year < *self.years.end() => {
                self.year += 1;
                GoToOutput::Ok
            }
            (GoToInput::Enter, _) => GoToOutput::Go {
                year: self.year,
                month: self.month,
            },
            _ => GoToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Previous,
    Next,
    SwitchField,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Go { year: i32, month: Month },
}
