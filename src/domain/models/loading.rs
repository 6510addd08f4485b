use ratatui::prelude::Alignment;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

/// Placeholder for the result pane while a generation request is in flight.
pub struct Loading {
    target: String,
}

impl Loading {
    pub fn new(target: &str) -> Loading {
        return Loading {
            target: target.to_string(),
        };
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        // Push the text roughly to the middle of the pane.
        let mut lines = vec![Line::default(); (rect.height.saturating_sub(4) / 2) as usize];
        lines.push(Line::from("Generating workout plan..."));
        lines.push(Line::styled(
            format!("Waiting on {}", self.target),
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .title("Workout plan")
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
            rect,
        );
    }
}
