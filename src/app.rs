use crate::calendar::{Calendar, Hit, PickerState, PRESETS};
use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::help::Help;
use crate::selection::RangeReport;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    picker: PickerState,
    state: AppState,
    exit_on_select: bool,
    reports: Vec<RangeReport>,
}

impl App {
    pub(crate) fn new(picker: PickerState, exit_on_select: bool) -> App {
        App {
            picker,
            state: AppState::Picking,
            exit_on_select,
            reports: Vec::new(),
        }
    }

    /// Run until the user quits, returning every completed selection in the
    /// order they were made
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Vec<RangeReport>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_event(read()?)?;
        }
        Ok(self.reports)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.picker.move_cursor(-1).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.picker.move_cursor(1).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.picker.move_cursor(-7).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.picker.move_cursor(7).is_ok(),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    // Weekends are silently ignored rather than beeped at
                    if let Some(report) = self.picker.pick_cursor() {
                        self.record(report);
                    }
                    true
                }
                KeyCode::Char('n') | KeyCode::PageDown => self.picker.next_month().is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.picker.previous_month().is_ok(),
                KeyCode::Char('N') => self.picker.next_year().is_ok(),
                KeyCode::Char('P') => self.picker.previous_year().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.picker.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Choosing(GoToState::new(self.picker.view()));
                    true
                }
                KeyCode::Char('c') => {
                    self.picker.clear_selection();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char(c) => self.press_preset(c),
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Choosing(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Picking;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('k') | KeyCode::Up => state.handle_input(GoToInput::Previous),
                        KeyCode::Char('j') | KeyCode::Down => state.handle_input(GoToInput::Next),
                        KeyCode::Char('h' | 'l') | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                            state.handle_input(GoToInput::SwitchField)
                        }
                        KeyCode::Enter => state.handle_input(GoToInput::Enter),
                        _ => GoToOutput::Invalid,
                    };
                    match output {
                        GoToOutput::Ok => true,
                        GoToOutput::Invalid => false,
                        GoToOutput::Go { year, month } => {
                            self.state = AppState::Picking;
                            self.picker.go_to(year, month).is_ok()
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        if self.state != AppState::Picking {
            return;
        }
        let hit = self.picker.hit(event.column, event.row);
        match (event.kind, hit) {
            (MouseEventKind::Down(MouseButton::Left), Some(Hit::Day(date))) => {
                if let Some(report) = self.picker.pick(date) {
                    self.record(report);
                }
            }
            (MouseEventKind::Down(MouseButton::Left), Some(Hit::Preset(days))) => {
                self.select_last_days(days);
            }
            (MouseEventKind::Moved, Some(Hit::Day(date))) => self.picker.hover(date),
            (MouseEventKind::Moved, _) => self.picker.leave(),
            _ => (),
        }
    }

    fn press_preset(&mut self, key: char) -> bool {
        if !self.picker.show_presets() {
            return false;
        }
        match PRESETS.iter().find(|&&(k, _, _)| k == key) {
            Some(&(_, days, _)) => self.select_last_days(days),
            None => false,
        }
    }

    fn select_last_days(&mut self, days: u16) -> bool {
        match self.picker.select_last_days(days) {
            Ok(report) => {
                self.record(report);
                true
            }
            Err(e) => {
                tracing::warn!(days, "Could not select range: {e}");
                false
            }
        }
    }

    fn record(&mut self, report: RangeReport) {
        self.reports.push(report);
        if self.exit_on_select {
            self.state = AppState::Quitting;
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Calendar.render(area, buf, &mut self.picker);
        match self.state {
            AppState::Helping => Help {
                style: BASE_STYLE,
                show_presets: self.picker.show_presets(),
            }
            .render(area, buf),
            AppState::Choosing(ref mut state) => GoTo.render(area, buf, state),
            AppState::Picking | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Choosing(GoToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::MonthView;
    use crate::selection::Selection;
    use time::{macros::date, Month};

    fn app(show_presets: bool, exit_on_select: bool) -> App {
        App::new(
            PickerState::new(date!(2024 - 06 - 20), show_presets),
            exit_on_select,
        )
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for &key in keys {
            app.handle_key(key);
        }
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn render(app: &mut App) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
    }

    #[test]
    fn test_pick_with_keys() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Enter, KeyCode::Right, KeyCode::Right]);
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Char(' ')]);
        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.reports[0].bounds, ["2024-06-20", "2024-06-24"]);
        assert_eq!(app.reports[0].weekends, ["2024-06-22", "2024-06-23"]);
        assert!(!app.quitting());
    }

    #[test]
    fn test_weekend_key_pick_ignored() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.picker.selector().selection(), Selection::Empty);
        assert!(app.reports.is_empty());
    }

    #[test]
    fn test_backwards_pick_restarts() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Enter, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(
            app.picker.selector().selection(),
            Selection::PartialStart(date!(2024 - 06 - 13))
        );
        assert!(app.reports.is_empty());
    }

    #[test]
    fn test_exit_on_select() {
        let mut app = app(true, true);
        press(&mut app, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert!(app.quitting());
        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.reports[0].bounds, ["2024-06-20", "2024-06-27"]);
    }

    #[test]
    fn test_preset_keys() {
        let mut app = app(true, false);
        assert!(app.handle_key(KeyCode::Char('7')));
        assert!(app.handle_key(KeyCode::Char('3')));
        let bounds = app
            .reports
            .iter()
            .map(|r| r.bounds.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            bounds,
            [
                [String::from("2024-06-13"), String::from("2024-06-20")],
                [String::from("2024-05-21"), String::from("2024-06-20")],
            ]
        );
    }

    #[test]
    fn test_preset_keys_hidden() {
        let mut app = app(false, false);
        assert!(!app.handle_key(KeyCode::Char('7')));
        assert!(app.reports.is_empty());
        assert_eq!(app.picker.selector().selection(), Selection::Empty);
    }

    #[test]
    fn test_month_navigation() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.picker.view(), MonthView::containing(date!(2024 - 07 - 01)));
        press(&mut app, &[KeyCode::Char('P'), KeyCode::PageUp, KeyCode::PageUp]);
        assert_eq!(app.picker.view(), MonthView::containing(date!(2023 - 05 - 01)));
        press(&mut app, &[KeyCode::Home]);
        assert_eq!(app.picker.view(), MonthView::containing(date!(2024 - 06 - 01)));
        assert_eq!(app.picker.cursor(), date!(2024 - 06 - 20));
    }

    #[test]
    fn test_go_to() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Down, KeyCode::Tab]);
        press(&mut app, &[KeyCode::Up, KeyCode::Up]);
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.view().year(), 2022);
        assert_eq!(app.picker.view().month(), Month::July);
    }

    #[test]
    fn test_go_to_cancel() {
        let mut app = app(true, false);
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Down, KeyCode::Esc]);
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.view().month(), Month::June);
        assert!(!app.quitting());
    }

    #[test]
    fn test_help() {
        let mut app = app(true, false);
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Picking);
    }

    #[test]
    fn test_invalid_key() {
        let mut app = app(true, false);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(!app.handle_key(KeyCode::F(1)));
    }

    #[test]
    fn test_quit() {
        let mut app = app(true, false);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_mouse() {
        let mut app = app(true, false);
        render(&mut app);
        // The calendar is centered at column 23, with June 10-16 on row 5
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 23 + 16, 5);
        assert_eq!(
            app.picker.selector().selection(),
            Selection::PartialStart(date!(2024 - 06 - 13))
        );
        mouse(&mut app, MouseEventKind::Moved, 23 + 21, 5);
        assert!(app.picker.selector().in_preview(date!(2024 - 06 - 14)));
        mouse(&mut app, MouseEventKind::Moved, 0, 0);
        assert!(!app.picker.selector().in_preview(date!(2024 - 06 - 14)));
        // Saturday
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 23 + 26, 5);
        assert!(app.reports.is_empty());
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 23 + 1, 6);
        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.reports[0].bounds, ["2024-06-13", "2024-06-17"]);
    }

    #[test]
    fn test_mouse_preset() {
        let mut app = app(true, false);
        render(&mut app);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 23 + 20, 10);
        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.reports[0].bounds, ["2024-05-21", "2024-06-20"]);
    }

    #[test]
    fn test_mouse_ignored_in_popup() {
        let mut app = app(true, false);
        render(&mut app);
        app.handle_key(KeyCode::Char('?'));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 23 + 16, 5);
        assert_eq!(app.picker.selector().selection(), Selection::Empty);
    }
}
