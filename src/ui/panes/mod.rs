//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`history`]: Submitted lines with their values or diagnostics
//! - [`tree`]: ASCII tree of the last parsed expression
//! - [`tokens`]: Token stream of the last line with per-kind counts
//! - [`input`]: The expression input line
//! - [`status`]: Status bar with keybindings and the last outcome
//! - `utils`: Shared block styling and scroll clamping
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*()` function. Panes hold no
//! state of their own; scroll offsets live in the app and are clamped here.

mod utils;

pub mod history;
pub mod input;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use history::render_history_pane;
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use tokens::{render_tokens_pane, TokensRenderData};
pub use tree::render_tree_pane;
