//! Main TUI application state and logic

use crate::pipeline::{trace, Input, PipelineError, Trace};
use crate::ui::panes::TokensRenderData;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Lines scrolled by PageUp/PageDown
const PAGE: usize = 5;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    History,
    Tree,
    Tokens,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: history -> tree -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::History => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::History,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::History => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::History,
            FocusedPane::Tokens => FocusedPane::Tree,
        }
    }
}

/// One submitted line and what it evaluated to
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub input: String,
    pub outcome: Result<i64, PipelineError>,
}

/// The main application state
pub struct App {
    /// Submitted lines, oldest first
    pub history: Vec<HistoryEntry>,

    /// Artifacts of the most recent submission
    pub last_trace: Option<Trace>,

    /// The line being edited
    pub input: String,

    /// Cursor position in `input`, in chars
    pub cursor: usize,

    /// Index into `history` while recalling with Up/Down
    pub recall_index: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub history_scroll: usize,
    pub tree_scroll: usize,
    pub tokens_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new() -> Self {
        App {
            history: Vec::new(),
            last_trace: None,
            input: String::new(),
            cursor: 0,
            recall_index: None,
            focused_pane: FocusedPane::History,
            history_scroll: 0,
            tree_scroll: 0,
            tokens_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input line, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Right column: AST (top) | Tokens (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        super::panes::render_history_pane(
            frame,
            columns[0],
            &self.history,
            self.focused_pane == FocusedPane::History,
            &mut self.history_scroll,
        );

        let ast = self.last_trace.as_ref().and_then(|t| t.ast.as_ref());
        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            ast,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let tokens_data = self.last_trace.as_ref().map(|t| TokensRenderData {
            tokens: &t.tokens,
            histogram: t.token_histogram(),
        });
        super::panes::render_tokens_pane(
            frame,
            right_rows[1],
            tokens_data.as_ref(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_input_pane(frame, main_chunks[1], &self.input, self.cursor);

        let failed_stage = self
            .history
            .last()
            .and_then(|entry| entry.outcome.as_ref().err())
            .map(|e| e.stage());
        let evaluated = self.history.iter().filter(|e| e.outcome.is_ok()).count();
        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            evaluated,
            failed_stage,
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_index();
                    self.input.remove(idx);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let idx = self.byte_index();
                    self.input.remove(idx);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
            }
            KeyCode::Up => self.recall_previous(),
            KeyCode::Down => self.recall_next(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE);
            }
            _ => {}
        }
    }

    /// Evaluate the input line and append it to the history
    pub(crate) fn submit(&mut self) {
        let line = self.input.trim().to_string();
        if line.is_empty() {
            self.status_message = "Nothing to evaluate".to_string();
            return;
        }

        let run = trace(Input::Text(&line));
        self.status_message = match &run.result {
            Ok(value) => format!("{} = {}", line, value),
            Err(e) => e.to_string(),
        };

        self.history.push(HistoryEntry {
            input: line,
            outcome: run.result.clone(),
        });
        self.last_trace = Some(run);

        self.input.clear();
        self.cursor = 0;
        self.recall_index = None;

        // Follow the newest entry; show new trees and tokens from the top
        self.history_scroll = usize::MAX;
        self.tree_scroll = 0;
        self.tokens_scroll = 0;
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    /// Step back through previous inputs
    fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.recall_index {
            Some(i) => i.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.load_recalled(index);
    }

    /// Step forward through previous inputs, ending on an empty line
    fn recall_next(&mut self) {
        match self.recall_index {
            Some(i) if i + 1 < self.history.len() => self.load_recalled(i + 1),
            Some(_) => {
                self.recall_index = None;
                self.input.clear();
                self.cursor = 0;
            }
            None => {}
        }
    }

    fn load_recalled(&mut self, index: usize) {
        self.recall_index = Some(index);
        self.input = self.history[index].input.clone();
        self.cursor = self.input.chars().count();
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::History => &mut self.history_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
        }
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_submit_records_history() {
        let mut app = App::new();
        type_line(&mut app, "2+3*4");
        type_line(&mut app, "5/0");

        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history[0].input, "2+3*4");
        assert_eq!(app.history[0].outcome, Ok(14));
        assert_eq!(
            app.history[1].outcome.as_ref().unwrap_err().stage(),
            Stage::Arithmetic
        );
        assert!(app.input.is_empty());
        assert!(app.last_trace.as_ref().unwrap().ast.is_some());
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut app = App::new();
        type_line(&mut app, "   ");
        assert!(app.history.is_empty());
        assert_eq!(app.status_message, "Nothing to evaluate");
    }

    #[test]
    fn test_editing_keys() {
        let mut app = App::new();
        for c in "1+3".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.input, "1-3");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.input, "9-3");
        assert_eq!(app.cursor, 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history[0].outcome, Ok(6));
    }

    #[test]
    fn test_history_recall() {
        let mut app = App::new();
        type_line(&mut app, "1");
        type_line(&mut app, "2");

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "2");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "1");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "1");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "2");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "");
        assert_eq!(app.recall_index, None);
    }

    #[test]
    fn test_focus_and_quit() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::History);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_render_shows_result_and_tree() {
        let mut app = App::new();
        type_line(&mut app, "6&3|8");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("6&3|8"));
        assert!(screen.contains("10"));
        assert!(screen.contains("( | )"));
        assert!(screen.contains("AST (5 nodes)"));
        assert!(screen.contains("BWOR"));
    }
}
