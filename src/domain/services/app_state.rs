#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use serde_json::Value;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::wrap_lines;
use super::Collapsible;
use super::ResultView;
use super::Scroll;
use crate::domain::models::pretty_json;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::FormField;
use crate::domain::models::FormState;
use crate::domain::models::GenerateError;
use crate::domain::models::RequestPayload;
use crate::domain::models::TextArea;
use crate::domain::models::Weekday;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Form,
    Result,
}

pub struct AppState<'a> {
    pub advisory: Option<String>,
    pub day_cursor: Weekday,
    pub error: Option<String>,
    pub field: FormField,
    pub focus: Focus,
    pub form: FormState,
    pub goal: tui_textarea::TextArea<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub result: Option<ResultView>,
    pub result_lines: Vec<Line<'static>>,
    pub scroll: Scroll,
    pub waiting_for_backend: bool,
}

impl<'a> Default for AppState<'a> {
    fn default() -> AppState<'a> {
        return AppState::new(FormState::default());
    }
}

impl<'a> AppState<'a> {
    pub fn new(form: FormState) -> AppState<'a> {
        let mut goal = TextArea::default();
        for (idx, line) in form.goal_text.split('\n').enumerate() {
            if idx > 0 {
                goal.insert_newline();
            }
            goal.insert_str(line);
        }

        let mut app_state = AppState {
            advisory: None,
            day_cursor: Weekday::Mon,
            error: None,
            field: FormField::GoalText,
            focus: Focus::Form,
            form,
            goal,
            last_known_height: 0,
            last_known_width: 0,
            result: None,
            result_lines: vec![],
            scroll: Scroll::default(),
            waiting_for_backend: false,
        };
        app_state.sync_goal_block();

        return app_state;
    }

    /// Returns true when the application should exit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::KeyboardCTRLC() => {
                return Ok(true);
            }
            Event::KeyboardInput(input) => {
                self.handle_input(input, tx)?;
            }
            Event::KeyboardPaste(text) => {
                self.handle_paste(&text);
            }
            Event::Notice(text) => {
                self.advisory = Some(text);
            }
            Event::PlanFailed(err) => {
                self.set_failure(err);
            }
            Event::PlanGenerated(value) => {
                self.set_result(value);
            }
            Event::ServiceUnreachable(text) => {
                if self.advisory.is_none() {
                    self.advisory = Some(text);
                }
            }
            Event::UIScrollDown() => {
                self.scroll.down();
            }
            Event::UIScrollUp() => {
                self.scroll.up();
            }
            Event::UITick() => (),
        }

        return Ok(false);
    }

    /// Validates the form and hands the payload to the actions service. A second
    /// submission while one is in flight is dropped.
    pub fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.waiting_for_backend {
            return Ok(());
        }

        self.sync_goal_text();
        let payload = match RequestPayload::build(&self.form) {
            Ok(payload) => payload,
            Err(err) => {
                self.advisory = Some(err.to_string());
                return Ok(());
            }
        };

        tracing::debug!(goal = %payload.goal_text, "submitting plan request");

        self.advisory = None;
        self.error = None;
        self.result = None;
        self.waiting_for_backend = true;
        self.scroll.first();
        self.sync_dependants();

        tx.send(Action::GeneratePlan(payload))?;
        return Ok(());
    }

    pub fn set_result(&mut self, value: Value) {
        self.waiting_for_backend = false;
        self.error = None;
        self.result = Some(ResultView::new(value));
        self.focus = Focus::Result;
        self.sync_goal_block();
        self.scroll.first();
        self.sync_dependants();
    }

    pub fn set_failure(&mut self, err: GenerateError) {
        self.waiting_for_backend = false;
        self.result = None;

        if err.is_connectivity() {
            self.error = None;
            self.advisory = Some(err.to_string());
        } else {
            self.error = Some(err.to_string());
        }

        self.scroll.first();
        self.sync_dependants();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn handle_paste(&mut self, text: &str) {
        if self.focus != Focus::Form || self.waiting_for_backend {
            return;
        }

        if self.field == FormField::GoalText {
            for (idx, line) in text.lines().enumerate() {
                if idx > 0 {
                    self.goal.insert_newline();
                }
                self.goal.insert_str(line);
            }
            self.sync_goal_text();
            return;
        }

        if let Some(value) = self.text_field_mut() {
            value.push_str(&text.replace(['\r', '\n'], ""));
        }
    }

    fn handle_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match input {
            Input { key: Key::Tab, .. } => {
                self.focus = match self.focus {
                    Focus::Form => Focus::Result,
                    Focus::Result => Focus::Form,
                };
                self.sync_goal_block();
                return Ok(());
            }
            Input {
                key: Key::Char('g'),
                ctrl: true,
                ..
            } => {
                return self.submit(tx);
            }
            _ => (),
        }

        if self.focus == Focus::Result {
            return self.handle_result_input(input, tx);
        }

        if self.waiting_for_backend {
            return Ok(());
        }

        if self.field == FormField::GoalText {
            self.handle_goal_input(input);
            return Ok(());
        }

        match input {
            Input { key: Key::Up, .. } => {
                self.set_field(self.field.prev());
                return Ok(());
            }
            Input { key: Key::Down, .. } => {
                self.set_field(self.field.next());
                return Ok(());
            }
            _ => (),
        }

        match self.field {
            FormField::DaysPerWeek => match input.key {
                Key::Left => {
                    self.form.step_days_per_week(false);
                    self.advisory = None;
                }
                Key::Right => {
                    self.form.step_days_per_week(true);
                    self.advisory = None;
                }
                Key::Enter => self.set_field(self.field.next()),
                _ => (),
            },
            FormField::SessionMinutes => match input.key {
                Key::Left => self.form.step_session_minutes(false),
                Key::Right => self.form.step_session_minutes(true),
                Key::Enter => self.set_field(self.field.next()),
                _ => (),
            },
            FormField::Sex => match input.key {
                Key::Left => self.form.cycle_sex(false),
                Key::Right => self.form.cycle_sex(true),
                Key::Enter => self.set_field(self.field.next()),
                _ => (),
            },
            FormField::Experience => match input.key {
                Key::Left => self.form.cycle_experience(false),
                Key::Right => self.form.cycle_experience(true),
                Key::Enter => self.set_field(self.field.next()),
                _ => (),
            },
            FormField::TrainingDays => self.handle_training_days_input(input),
            FormField::Submit => {
                if matches!(input.key, Key::Enter | Key::Char(' ')) {
                    return self.submit(tx);
                }
            }
            _ => self.handle_text_input(input),
        }

        return Ok(());
    }

    fn handle_goal_input(&mut self, input: Input) {
        let (row, _) = self.goal.cursor();
        match input {
            Input { key: Key::Up, .. } if row == 0 => {
                self.set_field(self.field.prev());
            }
            Input { key: Key::Down, .. } if row + 1 >= self.goal.lines().len() => {
                self.set_field(self.field.next());
            }
            input => {
                self.goal.input(input);
                self.sync_goal_text();
            }
        }
    }

    fn handle_training_days_input(&mut self, input: Input) {
        let days = Weekday::iter().collect::<Vec<Weekday>>();
        let idx = days
            .iter()
            .position(|e| return *e == self.day_cursor)
            .unwrap_or(0);

        match input.key {
            Key::Left => {
                self.day_cursor = days[(idx + days.len() - 1) % days.len()];
            }
            Key::Right => {
                self.day_cursor = days[(idx + 1) % days.len()];
            }
            Key::Char(' ') | Key::Enter => {
                if let Err(err) = self.form.toggle_training_day(self.day_cursor) {
                    self.advisory = Some(err.to_string());
                } else {
                    self.advisory = None;
                }
            }
            Key::Char('x') => {
                self.form.clear_training_days();
                self.advisory = None;
            }
            _ => (),
        }
    }

    fn handle_text_input(&mut self, input: Input) {
        if input.ctrl || input.alt {
            return;
        }

        if input.key == Key::Enter {
            self.set_field(self.field.next());
            return;
        }

        if let Some(value) = self.text_field_mut() {
            match input.key {
                Key::Char(c) => value.push(c),
                Key::Backspace => {
                    value.pop();
                }
                _ => (),
            }
        }
    }

    fn handle_result_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match input {
            Input { key: Key::Up, .. } => self.scroll.up(),
            Input { key: Key::Down, .. } => self.scroll.down(),
            Input {
                key: Key::PageUp, ..
            }
            | Input {
                key: Key::Char('u'),
                ctrl: true,
                ..
            } => self.scroll.up_page(),
            Input {
                key: Key::PageDown,
                ..
            }
            | Input {
                key: Key::Char('d'),
                ctrl: true,
                ..
            } => self.scroll.down_page(),
            Input {
                key: Key::Char(c),
                ctrl: false,
                alt: false,
                ..
            } => {
                let result = match self.result.as_mut() {
                    Some(result) => result,
                    None => return Ok(()),
                };

                match c {
                    'a' => result.toggle(Collapsible::Audit),
                    'o' => result.toggle(Collapsible::OtherFields),
                    'r' => result.toggle(Collapsible::RawJson),
                    'e' => result.toggle_all(),
                    'y' => {
                        tx.send(Action::CopyToClipboard(pretty_json(result.raw())))?;
                        return Ok(());
                    }
                    _ => return Ok(()),
                }

                self.sync_dependants();
            }
            _ => (),
        }

        return Ok(());
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        if let Some(measurement) = self.field.measurement() {
            return Some(self.form.measurement_mut(measurement));
        }

        match self.field {
            FormField::Seed => return Some(&mut self.form.seed),
            FormField::Equipment => return Some(&mut self.form.equipment),
            _ => return None,
        }
    }

    fn set_field(&mut self, field: FormField) {
        self.field = field;
        self.sync_goal_block();
    }

    fn sync_goal_text(&mut self) {
        self.form.goal_text = self.goal.lines().join("\n");
    }

    fn sync_goal_block(&mut self) {
        let focused = self.focus == Focus::Form && self.field == FormField::GoalText;
        self.goal.set_block(TextArea::block(focused));

        if focused {
            self.goal
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            self.goal.set_cursor_style(Style::default());
        }
    }

    /// Lines shown in the result pane, wrapped to its current width.
    fn pane_lines(&self) -> Vec<Line<'static>> {
        if let Some(error) = &self.error {
            return error
                .split('\n')
                .map(|line| {
                    return Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Red),
                    ));
                })
                .collect();
        }

        if let Some(result) = &self.result {
            return result.as_lines();
        }

        return vec![Line::from(Span::styled(
            "Fill in the form and press Ctrl+G to generate a workout plan.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    fn sync_dependants(&mut self) {
        // Borders and horizontal padding of the result pane.
        let width = self.last_known_width.saturating_sub(4) as usize;
        let height = self.last_known_height.saturating_sub(2) as usize;

        self.result_lines = wrap_lines(self.pane_lines(), width);
        self.scroll.set_state(self.result_lines.len(), height);
    }
}
