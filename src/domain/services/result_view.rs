#[cfg(test)]
#[path = "result_view_test.rs"]
mod tests;

use std::collections::HashSet;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use serde_json::Value;
use unicode_width::UnicodeWidthChar;

use crate::domain::models::DayView;
use crate::domain::models::Document;
use crate::domain::models::ExerciseEntry;
use crate::domain::models::ExerciseView;
use crate::domain::models::ImageRef;
use crate::domain::models::JsonNode;
use crate::domain::models::NoticeLevel;
use crate::domain::models::PlanView;
use crate::domain::models::Region;
use crate::domain::models::ScalarKind;
use crate::domain::models::StructuredPlan;

const INDENT: &str = "  ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collapsible {
    OtherFields,
    Audit,
    RawJson,
}

impl Collapsible {
    fn hotkey(&self) -> char {
        match self {
            Collapsible::OtherFields => return 'o',
            Collapsible::Audit => return 'a',
            Collapsible::RawJson => return 'r',
        }
    }
}

fn heading_style() -> Style {
    return Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);
}

fn label_style() -> Style {
    return Style::default().add_modifier(Modifier::BOLD);
}

fn dim_style() -> Style {
    return Style::default().fg(Color::DarkGray);
}

fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Warning => return Style::default().fg(Color::Yellow),
        NoticeLevel::Issue => return Style::default().fg(Color::Red),
    }
}

fn scalar_style(kind: ScalarKind) -> Style {
    match kind {
        ScalarKind::Null => return Style::default().fg(Color::DarkGray),
        ScalarKind::String => return Style::default().fg(Color::Green),
        ScalarKind::Number => return Style::default().fg(Color::Blue),
        ScalarKind::Boolean => return Style::default().fg(Color::Magenta),
    }
}

fn inline_span(node: &JsonNode) -> Span<'static> {
    match node {
        JsonNode::Scalar { kind, text } => return Span::styled(text.to_string(), scalar_style(*kind)),
        JsonNode::EmptySequence => return Span::styled("[]", dim_style()),
        JsonNode::EmptyMapping => return Span::styled("{}", dim_style()),
        // Only reached for non-inline nodes, which callers lay out themselves.
        JsonNode::Sequence(items) => {
            return Span::styled(format!("[{} items]", items.len()), dim_style());
        }
        JsonNode::Mapping(entries) => {
            return Span::styled(format!("{{{} keys}}", entries.len()), dim_style());
        }
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
}

impl LineBuilder {
    fn push(&mut self, depth: usize, spans: Vec<Span<'static>>) {
        let mut line_spans = vec![Span::raw(INDENT.repeat(depth))];
        line_spans.extend(spans);
        self.lines.push(Line::from(line_spans));
    }

    fn push_text(&mut self, depth: usize, text: &str, style: Style) {
        for line in text.split('\n') {
            self.push(depth, vec![Span::styled(line.to_string(), style)]);
        }
    }

    fn push_field(&mut self, depth: usize, label: &str, value: &str) {
        self.push(
            depth,
            vec![
                Span::styled(format!("{label}: "), label_style()),
                Span::raw(value.to_string()),
            ],
        );
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn push_node(&mut self, depth: usize, node: &JsonNode) {
        match node {
            JsonNode::Sequence(items) => {
                for (idx, item) in items.iter().enumerate() {
                    let index_span = Span::styled(format!("[{idx}]"), dim_style());
                    if item.is_inline() {
                        self.push(depth, vec![index_span, Span::raw(" "), inline_span(item)]);
                    } else {
                        self.push(depth, vec![index_span]);
                        self.push_node(depth + 1, item);
                    }
                }
            }
            JsonNode::Mapping(entries) => {
                for (key, value) in entries {
                    let key_span = Span::styled(
                        format!("\"{key}\":"),
                        Style::default().fg(Color::Cyan),
                    );
                    if value.is_inline() {
                        self.push(depth, vec![key_span, Span::raw(" "), inline_span(value)]);
                    } else {
                        self.push(depth, vec![key_span]);
                        self.push_node(depth + 1, value);
                    }
                }
            }
            _ => {
                self.push(depth, vec![inline_span(node)]);
            }
        }
    }
}

/// The result pane. Owns the response so it can be re-laid out whenever a
/// collapsed region is toggled or the terminal is resized.
pub struct ResultView {
    raw: Value,
    document: Document,
    expanded: HashSet<Collapsible>,
    hints: bool,
}

impl ResultView {
    pub fn new(raw: Value) -> ResultView {
        let document = Document::from_value(&raw);
        return ResultView {
            raw,
            document,
            expanded: HashSet::new(),
            hints: true,
        };
    }

    /// Hotkey hints only make sense inside the interactive form.
    pub fn without_hints(mut self) -> ResultView {
        self.hints = false;
        return self;
    }

    pub fn raw(&self) -> &Value {
        return &self.raw;
    }

    pub fn is_expanded(&self, collapsible: Collapsible) -> bool {
        return self.expanded.contains(&collapsible);
    }

    pub fn toggle(&mut self, collapsible: Collapsible) {
        if !self.expanded.remove(&collapsible) {
            self.expanded.insert(collapsible);
        }
    }

    pub fn toggle_all(&mut self) {
        let all = [
            Collapsible::OtherFields,
            Collapsible::Audit,
            Collapsible::RawJson,
        ];

        if all.iter().all(|e| return self.expanded.contains(e)) {
            self.expanded.clear();
        } else {
            self.expanded.extend(all);
        }
    }

    fn push_collapsible(
        &self,
        builder: &mut LineBuilder,
        depth: usize,
        collapsible: Collapsible,
        title: &str,
        body: impl FnOnce(&mut LineBuilder),
    ) {
        if self.is_expanded(collapsible) {
            builder.push(depth, vec![Span::styled(format!("▾ {title}"), heading_style())]);
            body(builder);
            return;
        }

        let mut spans = vec![Span::styled(format!("▸ {title}"), heading_style())];
        if self.hints {
            spans.push(Span::styled(
                format!(" (press {} to expand)", collapsible.hotkey()),
                dim_style(),
            ));
        }
        builder.push(depth, spans);
    }

    fn push_exercise(&self, builder: &mut LineBuilder, depth: usize, idx: usize, view: &ExerciseView) {
        let prefix = format!("{}. ", idx + 1);
        let detail_indent = " ".repeat(prefix.chars().count());

        let title = match (&view.title, &view.exercise_id) {
            (Some(title), _) => title.to_string(),
            (None, Some(id)) => format!("Exercise {id}"),
            (None, None) => "Exercise".to_string(),
        };
        builder.push(
            depth,
            vec![
                Span::raw(prefix),
                Span::styled(
                    title,
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );

        let detail = |label: &str, value: Span<'static>| {
            return vec![
                Span::raw(detail_indent.to_string()),
                Span::styled(format!("{label}: "), label_style()),
                value,
            ];
        };

        if let Some(image) = &view.image {
            let value = match image {
                ImageRef::Remote(url) => Span::styled(
                    url.to_string(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
                ImageRef::Unavailable(raw) => {
                    Span::styled(format!("could not load image ({raw})"), dim_style())
                }
            };
            builder.push(depth, detail("Image", value));
        }

        let mut stats = vec![];
        for (label, value, suffix) in [
            ("Exercise ID", &view.exercise_id, ""),
            ("Sets", &view.sets, ""),
            ("Reps", &view.reps, ""),
            ("Rest", &view.rest_sec, "s"),
        ] {
            if let Some(value) = value {
                if !stats.is_empty() {
                    stats.push(Span::styled(" · ", dim_style()));
                }
                stats.push(Span::styled(format!("{label}: "), label_style()));
                stats.push(Span::raw(format!("{value}{suffix}")));
            }
        }
        if !stats.is_empty() {
            let mut spans = vec![Span::raw(detail_indent.to_string())];
            spans.extend(stats);
            builder.push(depth, spans);
        }

        if !view.muscle_groups.is_empty() {
            builder.push(
                depth,
                detail("Muscle groups", Span::raw(view.muscle_groups.join(", "))),
            );
        }

        if let Some(notes) = &view.notes {
            builder.push(
                depth,
                detail("Notes", Span::styled(notes.to_string(), dim_style())),
            );
        }
    }

    fn push_day(&self, builder: &mut LineBuilder, depth: usize, day: &DayView) {
        builder.push(
            depth,
            vec![Span::styled(
                day.label.to_string(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )],
        );

        if let Some(body) = &day.body {
            builder.push_node(depth + 1, body);
        }

        for (idx, entry) in day.exercises.iter().enumerate() {
            match entry {
                ExerciseEntry::Structured(view) => {
                    self.push_exercise(builder, depth + 1, idx, view);
                }
                ExerciseEntry::Generic(node) => {
                    builder.push(depth + 1, vec![Span::raw(format!("{}.", idx + 1))]);
                    builder.push_node(depth + 2, node);
                }
            }
        }
    }

    fn push_structured_plan(&self, builder: &mut LineBuilder, plan: &StructuredPlan) {
        if let Some(goal) = &plan.goal {
            builder.push_field(1, "Goal", goal);
        }
        if let Some(days_per_week) = &plan.days_per_week {
            builder.push_field(1, "Days per week", days_per_week);
        }
        if let Some(session_minutes) = &plan.session_minutes {
            builder.push_field(1, "Session length", &format!("{session_minutes} min"));
        }
        if let Some(split) = &plan.split {
            builder.push_field(1, "Split", split);
        }

        if !plan.days.is_empty() {
            builder.push(1, vec![Span::styled("Schedule", heading_style())]);
            for day in plan.days.iter() {
                self.push_day(builder, 2, day);
            }
        }

        if let Some(other_fields) = &plan.other_fields {
            self.push_collapsible(builder, 1, Collapsible::OtherFields, "Other fields", |b| {
                b.push_node(2, other_fields);
            });
        }
    }

    fn push_region(&self, builder: &mut LineBuilder, region: &Region) {
        match region {
            Region::RequestId(request_id) => {
                builder.push(
                    0,
                    vec![
                        Span::styled("Request ID: ", heading_style()),
                        Span::styled(request_id.to_string(), dim_style()),
                    ],
                );
            }
            Region::Notices(level, items) => {
                let title = match level {
                    NoticeLevel::Warning => "⚠ Warnings",
                    NoticeLevel::Issue => "✖ Issues",
                };
                let style = notice_style(*level);
                builder.push(0, vec![Span::styled(title, style.add_modifier(Modifier::BOLD))]);
                for item in items {
                    let mut item_lines = item.split('\n');
                    let first = item_lines.next().unwrap_or_default();
                    builder.push(1, vec![Span::styled(format!("• {first}"), style)]);
                    for rest in item_lines {
                        builder.push(1, vec![Span::styled(format!("  {rest}"), style)]);
                    }
                }
            }
            Region::Plan(plan) => {
                builder.push(0, vec![Span::styled("Plan", heading_style())]);
                match plan {
                    PlanView::Text(text) | PlanView::Preformatted(text) => {
                        builder.push_text(1, text, Style::default());
                    }
                    PlanView::Structured(structured) => {
                        self.push_structured_plan(builder, structured);
                    }
                }
            }
            Region::Audit(node) => {
                self.push_collapsible(builder, 0, Collapsible::Audit, "Audit", |b| {
                    b.push_node(1, node);
                });
            }
            Region::ExtraFields(node) => {
                self.push_collapsible(
                    builder,
                    0,
                    Collapsible::OtherFields,
                    "Other response fields",
                    |b| {
                        b.push_node(1, node);
                    },
                );
            }
            Region::Generic(node) => {
                builder.push(0, vec![Span::styled("Response", heading_style())]);
                builder.push_node(1, node);
            }
            Region::RawJson(text) => {
                self.push_collapsible(builder, 0, Collapsible::RawJson, "Raw JSON response", |b| {
                    b.push_text(1, text, dim_style());
                });
            }
        }
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let mut builder = LineBuilder::default();
        for (idx, region) in self.document.regions.iter().enumerate() {
            if idx > 0 {
                builder.blank();
            }
            self.push_region(&mut builder, region);
        }

        return builder.lines;
    }

    pub fn plain_text(&self) -> String {
        return plain_text(&self.as_lines());
    }
}

/// Hard wraps lines at `width` terminal columns, keeping span styles intact.
/// Wide glyphs move to the next line rather than straddling the edge.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }

    let mut res = vec![];
    for line in lines {
        if line.width() <= width {
            res.push(line);
            continue;
        }

        let mut current: Vec<Span<'static>> = vec![];
        let mut current_width = 0;
        for span in line.spans {
            let style = span.style;
            let mut chunk = String::new();
            for ch in span.content.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width > 0 && current_width + ch_width > width {
                    if !chunk.is_empty() {
                        current.push(Span::styled(std::mem::take(&mut chunk), style));
                    }
                    res.push(Line::from(std::mem::take(&mut current)));
                    current_width = 0;
                }

                chunk.push(ch);
                current_width += ch_width;
            }

            if !chunk.is_empty() {
                current.push(Span::styled(chunk, style));
            }
        }

        if !current.is_empty() {
            res.push(Line::from(current));
        }
    }

    return res;
}

pub fn plain_text(lines: &[Line]) -> String {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.as_ref())
                .collect::<String>()
                .trim_end()
                .to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");
}
