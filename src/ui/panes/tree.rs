//! AST pane: the tree of the most recent line that parsed

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::ast::AstNode;
use crate::parser::tree_view::draw_tree;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    ast: Option<&AstNode>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let Some(ast) = ast else {
        let paragraph = Paragraph::new("(no tree)")
            .block(pane_block(" AST ", is_focused))
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let title = format!(" AST ({} nodes) ", ast.node_count());
    let block = pane_block(&title, is_focused);

    let rows = draw_tree(ast);
    let total_items = rows.len();
    let visible = visible_height(area);
    clamp_scroll(total_items, visible, scroll_offset);

    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(|row| ListItem::new(highlight_row(row)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Color literal labels, operator labels and connectors differently.
fn highlight_row(row: String) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_label = false;

    for ch in row.chars() {
        match ch {
            '(' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ));
                }
                in_label = true;
                current.push(ch);
            }
            ')' if in_label => {
                current.push(ch);
                let is_number = current.chars().any(|c| c.is_ascii_digit());
                let color = if is_number {
                    DEFAULT_THEME.number
                } else {
                    DEFAULT_THEME.operator
                };
                spans.push(Span::styled(std::mem::take(&mut current), Style::default().fg(color)));
                in_label = false;
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(DEFAULT_THEME.comment)));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_splits_labels_from_connectors() {
        let line = highlight_row("(001)     ( + )".to_string());
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["(001)", "     ", "( + )"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.number));
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.operator));
    }
}
