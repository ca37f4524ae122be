//! Shared utility functions for pane rendering
//!
//! All functions in this module are `pub(super)`, making them accessible only
//! within the panes module.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered, titled block whose border reflects focus.
pub(super) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least one.
pub(super) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `scroll_offset` so the last page is never scrolled past.
///
/// `usize::MAX` is the conventional "stick to the bottom" request.
pub(super) fn clamp_scroll(total_items: usize, visible_height: usize, scroll_offset: &mut usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = usize::MAX;
        clamp_scroll(10, 4, &mut offset);
        assert_eq!(offset, 6);

        let mut offset = 3;
        clamp_scroll(2, 4, &mut offset);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_visible_height_never_zero() {
        assert_eq!(visible_height(Rect::new(0, 0, 10, 1)), 1);
        assert_eq!(visible_height(Rect::new(0, 0, 10, 12)), 10);
    }
}
