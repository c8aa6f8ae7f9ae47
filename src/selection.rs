use crate::dates::{format_date, is_weekend, weekends_in_range};
use crate::month::OutOfTimeError;
use std::fmt;
use time::{Date, Duration};

/// An inclusive span of days whose start is never after its end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Returns `None` if `start` is after `end`
    pub(crate) fn new(start: Date, end: Date) -> Option<DateRange> {
        (start <= end).then_some(DateRange { start, end })
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    fn report(&self) -> RangeReport {
        RangeReport {
            bounds: [format_date(self.start), format_date(self.end)],
            weekends: weekends_in_range(self.start, self.end),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Selection {
    #[default]
    Empty,
    PartialStart(Date),
    Complete(DateRange),
}

/// What is handed to the caller each time a range is completed
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RangeReport {
    pub(crate) bounds: [String; 2],
    pub(crate) weekends: Vec<String>,
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [start, end] = &self.bounds;
        write!(f, "[{start}, {end}] weekends: [{}]", self.weekends.join(", "))
    }
}

/// Accumulates a start and an end weekday over successive picks
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RangeSelector {
    selection: Selection,
    hover: Option<Date>,
}

impl RangeSelector {
    pub(crate) fn new() -> RangeSelector {
        RangeSelector::default()
    }

    pub(crate) fn selection(&self) -> Selection {
        self.selection
    }

    /// Handle the user picking `date`.  Weekends are ignored.  Returns a
    /// report only when this pick completes a range.
    pub(crate) fn pick(&mut self, date: Date) -> Option<RangeReport> {
        if is_weekend(date) {
            tracing::debug!(date = %format_date(date), "Ignoring pick of weekend day");
            return None;
        }
        match self.selection {
            Selection::Empty | Selection::Complete(_) => {
                self.selection = Selection::PartialStart(date);
                None
            }
            Selection::PartialStart(start) => match DateRange::new(start, date) {
                Some(range) => Some(self.complete(range)),
                None => {
                    self.selection = Selection::PartialStart(date);
                    None
                }
            },
        }
    }

    /// Select the `days` days before `today` through `today`, whether or not
    /// either end is a weekend
    pub(crate) fn select_last_days(
        &mut self,
        today: Date,
        days: u16,
    ) -> Result<RangeReport, OutOfTimeError> {
        let start = today
            .checked_sub(Duration::days(days.into()))
            .ok_or(OutOfTimeError)?;
        let range = DateRange::new(start, today).ok_or(OutOfTimeError)?;
        Ok(self.complete(range))
    }

    pub(crate) fn clear(&mut self) {
        self.selection = Selection::Empty;
        self.hover = None;
    }

    pub(crate) fn hover(&mut self, date: Date) {
        self.hover = Some(date);
    }

    pub(crate) fn leave(&mut self) {
        self.hover = None;
    }

    /// The range that would be selected if the hovered date were picked
    /// next.  Only forwards ranges ending on a weekday are previewed.
    pub(crate) fn preview(&self) -> Option<DateRange> {
        let Selection::PartialStart(start) = self.selection else {
            return None;
        };
        let hovered = self.hover.filter(|&d| !is_weekend(d))?;
        DateRange::new(start, hovered)
    }

    /// Whether `date` should be shown as selected: a weekday inside the
    /// completed range, or the start of a range in progress
    pub(crate) fn is_selected(&self, date: Date) -> bool {
        match self.selection {
            Selection::Empty => false,
            Selection::PartialStart(start) => date == start,
            Selection::Complete(range) => range.contains(date) && !is_weekend(date),
        }
    }

    pub(crate) fn in_preview(&self, date: Date) -> bool {
        self.preview()
            .is_some_and(|range| range.contains(date) && !is_weekend(date))
    }

    fn complete(&mut self, range: DateRange) -> RangeReport {
        self.selection = Selection::Complete(range);
        self.hover = None;
        let report = range.report();
        tracing::info!(
            start = %report.bounds[0],
            end = %report.bounds[1],
            weekends = report.weekends.len(),
            "Range selected"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_pick_forward() {
        let mut sel = RangeSelector::new();
        assert_eq!(sel.pick(date!(2024 - 06 - 14)), None);
        assert_eq!(
            sel.selection(),
            Selection::PartialStart(date!(2024 - 06 - 14))
        );
        let report = sel.pick(date!(2024 - 06 - 17));
        assert_eq!(
            report,
            Some(RangeReport {
                bounds: ["2024-06-14".into(), "2024-06-17".into()],
                weekends: vec!["2024-06-15".into(), "2024-06-16".into()],
            })
        );
        assert_eq!(
            sel.selection(),
            Selection::Complete(DateRange {
                start: date!(2024 - 06 - 14),
                end: date!(2024 - 06 - 17),
            })
        );
    }

    #[test]
    fn test_pick_same_day_twice() {
        let mut sel = RangeSelector::new();
        assert_eq!(sel.pick(date!(2024 - 06 - 12)), None);
        let report = sel.pick(date!(2024 - 06 - 12)).unwrap();
        assert_eq!(report.bounds, ["2024-06-12", "2024-06-12"]);
        assert!(report.weekends.is_empty());
    }

    #[test]
    fn test_pick_backward_restarts() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 19));
        assert_eq!(sel.pick(date!(2024 - 06 - 12)), None);
        assert_eq!(
            sel.selection(),
            Selection::PartialStart(date!(2024 - 06 - 12))
        );
    }

    #[test]
    fn test_pick_after_complete_starts_over() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 10));
        assert!(sel.pick(date!(2024 - 06 - 11)).is_some());
        assert_eq!(sel.pick(date!(2024 - 06 - 03)), None);
        assert_eq!(
            sel.selection(),
            Selection::PartialStart(date!(2024 - 06 - 03))
        );
    }

    #[test]
    fn test_weekend_picks_ignored() {
        let saturday = date!(2024 - 06 - 15);
        let sunday = date!(2024 - 06 - 16);
        let mut sel = RangeSelector::new();
        assert_eq!(sel.pick(saturday), None);
        assert_eq!(sel.selection(), Selection::Empty);
        sel.pick(date!(2024 - 06 - 14));
        assert_eq!(sel.pick(sunday), None);
        assert_eq!(
            sel.selection(),
            Selection::PartialStart(date!(2024 - 06 - 14))
        );
        sel.pick(date!(2024 - 06 - 17));
        let before = sel.selection();
        assert_eq!(sel.pick(saturday), None);
        assert_eq!(sel.selection(), before);
    }

    #[test]
    fn test_report_fires_once() {
        let mut sel = RangeSelector::new();
        let reports = [
            date!(2024 - 06 - 03),
            date!(2024 - 06 - 15),
            date!(2024 - 06 - 07),
            date!(2024 - 06 - 08),
        ]
        .into_iter()
        .filter_map(|d| sel.pick(d))
        .collect::<Vec<_>>();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].bounds, ["2024-06-03", "2024-06-07"]);
        assert!(reports[0].weekends.is_empty());
    }

    #[test]
    fn test_select_last_days() {
        let today = date!(2024 - 06 - 17);
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 05 - 01));
        let report = sel.select_last_days(today, 7).unwrap();
        assert_eq!(
            sel.selection(),
            Selection::Complete(DateRange {
                start: date!(2024 - 06 - 10),
                end: today,
            })
        );
        assert_eq!(report.bounds, ["2024-06-10", "2024-06-17"]);
        assert_eq!(report.weekends, ["2024-06-15", "2024-06-16"]);
    }

    #[test]
    fn test_select_last_days_allows_weekend_ends() {
        let today = date!(2024 - 06 - 16);
        let mut sel = RangeSelector::new();
        let report = sel.select_last_days(today, 30).unwrap();
        assert_eq!(report.bounds, ["2024-05-17", "2024-06-16"]);
        assert_eq!(report.weekends.first().map(String::as_str), Some("2024-05-18"));
        assert_eq!(report.weekends.last().map(String::as_str), Some("2024-06-16"));
    }

    #[test]
    fn test_select_last_days_out_of_time() {
        let mut sel = RangeSelector::new();
        assert_eq!(sel.select_last_days(Date::MIN, 7), Err(OutOfTimeError));
        assert_eq!(sel.selection(), Selection::Empty);
    }

    #[test]
    fn test_preview() {
        let mut sel = RangeSelector::new();
        sel.hover(date!(2024 - 06 - 12));
        assert_eq!(sel.preview(), None);
        sel.pick(date!(2024 - 06 - 10));
        assert_eq!(
            sel.preview(),
            DateRange::new(date!(2024 - 06 - 10), date!(2024 - 06 - 12))
        );
        assert!(sel.in_preview(date!(2024 - 06 - 11)));
        assert!(!sel.in_preview(date!(2024 - 06 - 13)));
        sel.hover(date!(2024 - 06 - 15));
        assert_eq!(sel.preview(), None);
        sel.hover(date!(2024 - 06 - 07));
        assert_eq!(sel.preview(), None);
        sel.hover(date!(2024 - 06 - 18));
        assert!(sel.in_preview(date!(2024 - 06 - 14)));
        assert!(!sel.in_preview(date!(2024 - 06 - 15)));
        sel.leave();
        assert_eq!(sel.preview(), None);
    }

    #[test]
    fn test_preview_leaves_selection_alone() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 10));
        sel.hover(date!(2024 - 06 - 20));
        assert_eq!(
            sel.selection(),
            Selection::PartialStart(date!(2024 - 06 - 10))
        );
    }

    #[test]
    fn test_complete_clears_hover() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 10));
        sel.hover(date!(2024 - 06 - 12));
        sel.pick(date!(2024 - 06 - 12));
        assert_eq!(sel.hover, None);
        assert_eq!(sel.preview(), None);
    }

    #[test]
    fn test_is_selected() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 14));
        assert!(sel.is_selected(date!(2024 - 06 - 14)));
        assert!(!sel.is_selected(date!(2024 - 06 - 13)));
        sel.pick(date!(2024 - 06 - 18));
        assert!(sel.is_selected(date!(2024 - 06 - 14)));
        assert!(!sel.is_selected(date!(2024 - 06 - 15)));
        assert!(sel.is_selected(date!(2024 - 06 - 17)));
        assert!(sel.is_selected(date!(2024 - 06 - 18)));
        assert!(!sel.is_selected(date!(2024 - 06 - 19)));
    }

    #[test]
    fn test_clear() {
        let mut sel = RangeSelector::new();
        sel.pick(date!(2024 - 06 - 14));
        sel.hover(date!(2024 - 06 - 18));
        sel.clear();
        assert_eq!(sel, RangeSelector::new());
    }

    #[test]
    fn test_report_display() {
        let report = RangeReport {
            bounds: ["2024-06-14".into(), "2024-06-17".into()],
            weekends: vec!["2024-06-15".into(), "2024-06-16".into()],
        };
        assert_eq!(
            report.to_string(),
            "[2024-06-14, 2024-06-17] weekends: [2024-06-15, 2024-06-16]"
        );
    }
}
