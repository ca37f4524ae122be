//! Token pane: the token stream of the most recent line
//!
//! Whitespace tokens are hidden from the list but counted in the summary
//! line, so the per-character space granularity stays visible.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Everything the token pane displays
pub struct TokensRenderData<'a> {
    pub tokens: &'a [Token],
    pub histogram: FxHashMap<&'static str, usize>,
}

/// Render the token pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    data: Option<&TokensRenderData>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    let Some(data) = data.filter(|d| !d.tokens.is_empty()) else {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut all_items = vec![ListItem::new(Line::from(Span::styled(
        summarize(&data.histogram),
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD),
    )))];
    all_items.extend(
        data.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Space)
            .map(token_item),
    );

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

fn token_item(token: &Token) -> ListItem<'static> {
    let color = match token.kind {
        TokenKind::Number(_) => DEFAULT_THEME.number,
        TokenKind::LParen | TokenKind::RParen => DEFAULT_THEME.paren,
        TokenKind::Ident(_) | TokenKind::Eof => DEFAULT_THEME.comment,
        _ => DEFAULT_THEME.operator,
    };

    let mut spans = vec![
        Span::styled(
            format!("{:>3}:{:<3} ", token.location.line, token.location.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<10}", token.kind.name()), Style::default().fg(color)),
    ];
    if let Some(text) = token.literal() {
        spans.push(Span::styled(text.to_string(), Style::default().fg(DEFAULT_THEME.fg)));
    }

    ListItem::new(Line::from(spans))
}

/// One-line `KIND×count` summary, sorted by kind name.
pub(crate) fn summarize(histogram: &FxHashMap<&'static str, usize>) -> String {
    let mut counts: Vec<(&str, usize)> = histogram.iter().map(|(k, v)| (*k, *v)).collect();
    counts.sort_unstable();
    counts
        .iter()
        .map(|(kind, count)| format!("{}×{}", kind, count))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{trace, Input};

    #[test]
    fn test_summary_is_sorted() {
        let run = trace(Input::Text("1 +  2"));
        assert_eq!(
            summarize(&run.token_histogram()),
            "EOF×1 NUMBER×2 PLUS×1 SPACE×3"
        );
    }
}
