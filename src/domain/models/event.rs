use serde_json::Value;
use tui_textarea::Input;

use super::GenerateError;

pub enum Event {
    KeyboardCTRLC(),
    KeyboardInput(Input),
    KeyboardPaste(String),
    Notice(String),
    PlanFailed(GenerateError),
    PlanGenerated(Value),
    ServiceUnreachable(String),
    UIScrollDown(),
    UIScrollUp(),
    UITick(),
}
