#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::PlanApiBox;
use crate::domain::models::RequestPayload;

pub fn help_text() -> String {
    let text = r#"
FORM HOTKEYS:
- Up/Down arrow - Move between fields
- Left/Right arrow - Change the focused value, or pick a weekday
- Space - Select or unselect the highlighted training day
- x - Clear the training day selection and let the service pick days
- Enter - Next field, or generate when on the button
- CTRL+G - Generate a workout plan
- Tab - Switch between the form and the result pane
- CTRL+C - Exit

RESULT HOTKEYS:
- Up/Down arrow - Scroll
- CTRL+U / CTRL+D - Page up / Page down
- a - Expand or collapse audit metadata
- o - Expand or collapse other plan and response fields
- r - Expand or collapse the raw JSON response
- e - Expand or collapse everything
- y - Copy the raw JSON response to your clipboard
        "#;

    return text.trim().to_string();
}

async fn generate_plan(
    api: Arc<PlanApiBox>,
    payload: RequestPayload,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match api.generate(&payload).await {
        Ok(value) => {
            tx.send(Event::PlanGenerated(value))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "plan generation failed");
            tx.send(Event::PlanFailed(err))?;
        }
    }

    return Ok(());
}

async fn health_check(api: Arc<PlanApiBox>, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = api.health_check().await {
        tracing::warn!(error = ?err, "health check failed");
        tx.send(Event::ServiceUnreachable(err.to_string()))?;
    }

    return Ok(());
}

fn copy_to_clipboard(text: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = ClipboardService::set(text) {
        tracing::warn!(error = ?err, "clipboard unavailable");
        tx.send(Event::Notice(err.to_string()))?;
        return Ok(());
    }

    tx.send(Event::Notice(
        "Copied the raw JSON response to your clipboard.".to_string(),
    ))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs until the action channel closes. Network calls run on their own
    /// tasks so the UI keeps receiving ticks while a request is in flight.
    pub async fn start(
        api: PlanApiBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let api = Arc::new(api);

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_api = api.clone();

            match action {
                Action::CopyToClipboard(text) => {
                    copy_to_clipboard(text, &tx)?;
                }
                Action::GeneratePlan(payload) => {
                    tokio::spawn(async move {
                        return generate_plan(worker_api, payload, worker_tx).await;
                    });
                }
                Action::HealthCheck() => {
                    tokio::spawn(async move {
                        return health_check(worker_api, worker_tx).await;
                    });
                }
            }
        }

        return Ok(());
    }
}
