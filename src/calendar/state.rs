use crate::month::{MonthView, OutOfTimeError};
use crate::selection::{RangeReport, RangeSelector};
use ratatui::layout::Rect;
use time::{Date, Duration, Month};

/// The quick-range buttons: the key that triggers each, how many days back
/// from today it reaches, and its label
pub(crate) const PRESETS: [(char, u16, &str); 2] =
    [('7', 7, "Last 7 Days"), ('3', 30, "Last 30 Days")];

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerState {
    pub(super) today: Date,
    view: MonthView,
    cursor: Date,
    selector: RangeSelector,
    show_presets: bool,
    // Where things were drawn on the last render; `None` until then
    pub(super) layout: Option<GridLayout>,
}

impl PickerState {
    pub(crate) fn new(today: Date, show_presets: bool) -> Self {
        PickerState {
            today,
            view: MonthView::containing(today),
            cursor: today,
            selector: RangeSelector::new(),
            show_presets,
            layout: None,
        }
    }

    /// Open the calendar on the month containing `date` with the cursor on
    /// `date`
    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.cursor = date;
        self.view = MonthView::containing(date);
        self
    }

    pub(crate) fn view(&self) -> MonthView {
        self.view
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    pub(crate) fn show_presets(&self) -> bool {
        self.show_presets
    }

    pub(crate) fn pick(&mut self, date: Date) -> Option<RangeReport> {
        self.set_cursor(date);
        self.selector.pick(date)
    }

    pub(crate) fn pick_cursor(&mut self) -> Option<RangeReport> {
        self.selector.pick(self.cursor)
    }

    pub(crate) fn select_last_days(&mut self, days: u16) -> Result<RangeReport, OutOfTimeError> {
        self.selector.select_last_days(self.today, days)
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selector.clear();
    }

    pub(crate) fn hover(&mut self, date: Date) {
        self.selector.hover(date);
    }

    pub(crate) fn leave(&mut self) {
        self.selector.leave();
    }

    /// Move the cursor by `days` days (negative for backwards), bringing the
    /// displayed month along
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let date = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        self.set_cursor(date);
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.set_cursor(self.today);
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.navigate(MonthView::next_month)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.navigate(MonthView::previous_month)
    }

    pub(crate) fn next_year(&mut self) -> Result<(), OutOfTimeError> {
        self.navigate(MonthView::next_year)
    }

    pub(crate) fn previous_year(&mut self) -> Result<(), OutOfTimeError> {
        self.navigate(MonthView::previous_year)
    }

    pub(crate) fn go_to(&mut self, year: i32, month: Month) -> Result<(), OutOfTimeError> {
        self.navigate(|view| {
            view.set_year(year)?;
            view.set_month(month);
            Ok(())
        })
    }

    /// Returns what was drawn at the given terminal cell during the last
    /// render
    pub(crate) fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        self.layout.as_ref()?.hit(column, row)
    }

    fn set_cursor(&mut self, date: Date) {
        self.cursor = date;
        self.view = MonthView::containing(date);
        self.selector.hover(date);
    }

    fn navigate<F>(&mut self, step: F) -> Result<(), OutOfTimeError>
    where
        F: FnOnce(&mut MonthView) -> Result<(), OutOfTimeError>,
    {
        let mut view = self.view;
        step(&mut view)?;
        let cursor = view.clamp_day(self.cursor.day()).ok_or(OutOfTimeError)?;
        tracing::debug!(year = view.year(), month = %view.month(), "Changed displayed month");
        self.view = view;
        self.cursor = cursor;
        self.selector.hover(cursor);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Hit {
    Day(Date),
    Preset(u16),
}

/// Positions of the interactive parts of the calendar as last drawn
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GridLayout {
    /// The area covered by the day rows
    pub(super) days: Rect,
    /// Width of each day cell, not counting the gap after it
    pub(super) cell_width: u16,
    /// Distance between the left edges of consecutive day cells
    pub(super) cell_stride: u16,
    pub(super) weeks: Vec<[Option<Date>; 7]>,
    pub(super) presets: Vec<(Rect, u16)>,
}

impl GridLayout {
    fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        if let Some(&(_, days)) = self
            .presets
            .iter()
            .find(|(rect, _)| contains(*rect, column, row))
        {
            return Some(Hit::Preset(days));
        }
        if !contains(self.days, column, row) {
            return None;
        }
        let offset = column - self.days.x;
        if offset % self.cell_stride >= self.cell_width {
            return None;
        }
        let week = self.weeks.get(usize::from(row - self.days.y))?;
        week.get(usize::from(offset / self.cell_stride))
            .copied()
            .flatten()
            .map(Hit::Day)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.x <= column && column < rect.right() && rect.y <= row && row < rect.bottom()
}
