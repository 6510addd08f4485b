use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_placeholder_text("e.g. Lose fat, visible abs, broader shoulders.");
        textarea.set_block(TextArea::block(false));

        return textarea;
    }

    pub fn block(focused: bool) -> Block<'a> {
        let border_type = if focused {
            BorderType::Double
        } else {
            BorderType::Plain
        };

        return Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .title("Goal (goal_text)")
            .padding(Padding::new(1, 1, 0, 0));
    }
}
