//! Input line rendering

use super::utils::pane_block;
use crate::repl::PROMPT;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the input line and place the terminal cursor at `cursor` (a char index).
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let block = pane_block(" Expression ", true);

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(input.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    // Inside the border, after the prompt
    let max_x = area.x + area.width.saturating_sub(2);
    let x = (area.x + 1 + PROMPT.len() as u16 + cursor as u16).min(max_x);
    frame.set_cursor_position((x, area.y + 1));
}
