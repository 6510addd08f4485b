use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::FormState;
use crate::domain::models::Loading;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Focus;
use crate::domain::services::FormView;

fn render_advisory(frame: &mut Frame, rect: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Yellow))
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
        rect,
    );
}

fn render_result(frame: &mut Frame, rect: Rect, app_state: &mut AppState) {
    let border_type = if app_state.focus == Focus::Result {
        BorderType::Double
    } else {
        BorderType::Plain
    };

    frame.render_widget(
        Paragraph::new(app_state.result_lines.clone())
            .scroll((app_state.scroll.offset(), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .title("Workout plan")
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
        rect,
    );

    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let loading = Loading::new(&Config::get(ConfigKey::ApiURL));
    let mut events = EventsService::new(rx);

    tx.send(Action::HealthCheck())?;

    loop {
        terminal.draw(|frame| {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(frame.size());

            let advisory_height = if app_state.advisory.is_some() { 4 } else { 0 };
            let form_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(5),
                    Constraint::Min(1),
                    Constraint::Length(advisory_height),
                ])
                .split(columns[0]);

            if columns[1].width != app_state.last_known_width
                || columns[1].height != app_state.last_known_height
            {
                app_state.set_rect(columns[1]);
            }

            frame.render_widget(app_state.goal.widget(), form_layout[0]);

            let focus = if app_state.focus == Focus::Form {
                Some(app_state.field)
            } else {
                None
            };
            FormView::render(
                frame,
                form_layout[1],
                &app_state.form,
                focus,
                app_state.day_cursor,
                app_state.waiting_for_backend,
            );

            if let Some(advisory) = &app_state.advisory {
                render_advisory(frame, form_layout[2], advisory);
            }

            if app_state.waiting_for_backend {
                loading.render(frame, columns[1]);
            } else {
                render_result(frame, columns[1], app_state);
            }
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    form: FormState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(form);

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
