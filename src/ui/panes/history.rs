//! History pane: every submitted line and what it produced

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::ui::app::HistoryEntry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the history pane
pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[HistoryEntry],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" History ", is_focused);

    if entries.is_empty() {
        let paragraph = Paragraph::new("(type an expression and press Enter)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = entries.iter().flat_map(entry_items).collect();

    let total_items = all_items.len();
    let visible = visible_height(area);
    clamp_scroll(total_items, visible, scroll_offset);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn entry_items(entry: &HistoryEntry) -> [ListItem<'static>; 2] {
    let input = Line::from(vec![
        Span::styled(
            crate::repl::PROMPT.to_string(),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(entry.input.clone(), Style::default().fg(DEFAULT_THEME.fg)),
    ]);

    let outcome = match &entry.outcome {
        Ok(value) => Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )),
        Err(e) => Line::from(Span::styled(
            e.to_string(),
            Style::default().fg(DEFAULT_THEME.error),
        )),
    };

    [ListItem::new(input), ListItem::new(outcome)]
}
