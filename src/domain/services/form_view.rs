#[cfg(test)]
#[path = "form_view_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use strum::IntoEnumIterator;

use crate::domain::models::FormField;
use crate::domain::models::FormState;
use crate::domain::models::Weekday;

const LABEL_WIDTH: usize = 15;

fn dim_style() -> Style {
    return Style::default().fg(Color::DarkGray);
}

fn focus_style() -> Style {
    return Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
}

fn stepper(value: String) -> Vec<Span<'static>> {
    return vec![
        Span::styled("◂ ", dim_style()),
        Span::raw(value),
        Span::styled(" ▸", dim_style()),
    ];
}

fn text_value(value: &str, focused: bool) -> Vec<Span<'static>> {
    let mut spans = vec![];
    if value.is_empty() && !focused {
        spans.push(Span::styled("not set", dim_style()));
    } else {
        spans.push(Span::raw(value.to_string()));
    }

    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    return spans;
}

/// Everything below the goal box: one line per field plus the submit button.
/// `focus` is `None` while the result pane has the keyboard.
pub struct FormView {}

impl FormView {
    fn training_days(form: &FormState, focused: bool, day_cursor: Weekday) -> Vec<Span<'static>> {
        let mut spans = vec![];
        for (idx, day) in Weekday::iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }

            let selected = form.training_days().contains(&day);
            let (text, mut style) = if selected {
                (format!("[{}]", day.label()), Style::default().fg(Color::Green))
            } else {
                (format!(" {} ", day.label()), Style::default())
            };

            if focused && day == day_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(text, style));
        }

        let summary = if form.is_auto_schedule() {
            "auto schedule".to_string()
        } else {
            format!(
                "{}/{} selected",
                form.training_days().len(),
                form.days_per_week
            )
        };
        spans.push(Span::styled(format!("  {summary}"), dim_style()));

        return spans;
    }

    fn value(
        form: &FormState,
        field: FormField,
        focused: bool,
        day_cursor: Weekday,
    ) -> Vec<Span<'static>> {
        if let Some(measurement) = field.measurement() {
            return text_value(form.measurement(measurement), focused);
        }

        match field {
            FormField::DaysPerWeek => return stepper(form.days_per_week.to_string()),
            FormField::SessionMinutes => {
                return stepper(format!("{} min", form.session_minutes));
            }
            FormField::TrainingDays => return FormView::training_days(form, focused, day_cursor),
            FormField::Sex => {
                return stepper(
                    form.sex
                        .map(|e| return e.to_string())
                        .unwrap_or_else(|| return "not set".to_string()),
                );
            }
            FormField::Experience => {
                return stepper(
                    form.experience
                        .map(|e| return e.to_string())
                        .unwrap_or_else(|| return "not set".to_string()),
                );
            }
            FormField::Seed => return text_value(&form.seed, focused),
            FormField::Equipment => return text_value(&form.equipment, focused),
            _ => return vec![],
        }
    }

    fn submit_line(form: &FormState, focused: bool, waiting: bool) -> Line<'static> {
        let marker = if focused { "› " } else { "  " };

        let (text, style) = if waiting {
            ("[ Generating... ]".to_string(), dim_style())
        } else if form.goal_text.trim().is_empty() {
            (format!("[ {} ]", FormField::Submit.label()), dim_style())
        } else if focused {
            (
                format!("[ {} ]", FormField::Submit.label()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            (
                format!("[ {} ]", FormField::Submit.label()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };

        return Line::from(vec![
            Span::styled(marker, focus_style()),
            Span::styled(text, style),
        ]);
    }

    pub fn as_lines(
        form: &FormState,
        focus: Option<FormField>,
        day_cursor: Weekday,
        waiting: bool,
    ) -> Vec<Line<'static>> {
        let mut lines = vec![];

        for field in FormField::iter() {
            let focused = focus == Some(field);
            match field {
                // Rendered by the goal text area above the form.
                FormField::GoalText => continue,
                FormField::Submit => {
                    lines.push(Line::default());
                    lines.push(FormView::submit_line(form, focused, waiting));
                    continue;
                }
                _ => (),
            }

            let (marker, label_style) = if focused {
                ("› ", focus_style())
            } else {
                ("  ", Style::default())
            };

            let mut spans = vec![
                Span::styled(marker, focus_style()),
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                    label_style,
                ),
                Span::raw("  "),
            ];
            spans.extend(FormView::value(form, field, focused, day_cursor));
            lines.push(Line::from(spans));
        }

        return lines;
    }

    pub fn hints(focus: Option<FormField>) -> Line<'static> {
        let text = match focus {
            Some(FormField::GoalText) => "type your goal · ↓ next field · Ctrl+G generate · Tab results",
            Some(FormField::TrainingDays) => {
                "←/→ pick day · space toggle · x clear · ↑/↓ fields · Ctrl+G generate"
            }
            Some(field) if field.is_text() => "type a value · ↑/↓ fields · Ctrl+G generate",
            Some(FormField::Submit) => "enter generate · ↑/↓ fields · Tab results",
            Some(_) => "←/→ change · ↑/↓ fields · Ctrl+G generate",
            None => "↑/↓ scroll · a audit · o other fields · r raw · e all · y copy · Tab form",
        };

        return Line::from(Span::styled(text, dim_style()));
    }

    pub fn render(
        frame: &mut Frame,
        rect: Rect,
        form: &FormState,
        focus: Option<FormField>,
        day_cursor: Weekday,
        waiting: bool,
    ) {
        let border_type = if focus.is_some() && focus != Some(FormField::GoalText) {
            BorderType::Double
        } else {
            BorderType::Plain
        };

        let mut lines = FormView::as_lines(form, focus, day_cursor, waiting);
        lines.push(Line::default());
        lines.push(FormView::hints(focus));

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .title("Preferences")
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            rect,
        );
    }
}
