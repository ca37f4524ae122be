//! Line-oriented read-eval-print loop
//!
//! Reads one line at a time from any [`BufRead`], runs the pipeline on it and
//! writes the value, or a one-line diagnostic, to any [`Write`]. Failures are
//! local to their line: the loop always continues with the next one.

use crate::parser::tree_view::draw_tree;
use crate::pipeline::{trace, Input};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = " > ";

/// What the loop prints besides the result
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Print the AST of every line that parsed
    pub show_tree: bool,
    /// Print the token stream of every line that lexed
    pub show_tokens: bool,
    /// Suppress the prompt (for piped input)
    pub no_prompt: bool,
}

/// Counts gathered over one REPL session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    pub evaluated: usize,
    pub failed: usize,
}

/// Run the loop until `input` is exhausted.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    options: ReplOptions,
) -> io::Result<ReplSummary> {
    let mut summary = ReplSummary::default();
    let mut line = String::new();

    loop {
        if !options.no_prompt {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            if !options.no_prompt {
                writeln!(output)?;
            }
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        let run = trace(Input::Text(&line));

        if options.show_tokens {
            for token in run.significant_tokens() {
                match token.literal() {
                    Some(text) => writeln!(output, "{}: {}", token.kind.name(), text)?,
                    None => writeln!(output, "{}:", token.kind.name())?,
                }
            }
        }

        if options.show_tree {
            if let Some(ast) = &run.ast {
                for row in draw_tree(ast) {
                    writeln!(output, "{}", row)?;
                }
            }
        }

        match run.result {
            Ok(value) => {
                summary.evaluated += 1;
                writeln!(output, "{}", value)?;
            }
            Err(e) => {
                summary.failed += 1;
                writeln!(output, "{}", e)?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str, options: ReplOptions) -> (String, ReplSummary) {
        let mut output = Vec::new();
        let summary = run_repl(Cursor::new(input.as_bytes()), &mut output, options).unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_prints_one_result_per_line() {
        let quiet = ReplOptions {
            no_prompt: true,
            ..ReplOptions::default()
        };
        let (out, summary) = session("2+3*4\n8-3-2\n\n(2+3)*4\n", quiet);
        assert_eq!(out, "14\n3\n20\n");
        assert_eq!(
            summary,
            ReplSummary {
                evaluated: 3,
                failed: 0
            }
        );
    }

    #[test]
    fn test_failures_do_not_stop_the_loop() {
        let quiet = ReplOptions {
            no_prompt: true,
            ..ReplOptions::default()
        };
        let (out, summary) = session("1 @ 2\n(1+2\n5/0\n6&3|8", quiet);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Invalid syntax"));
        assert!(lines[1].starts_with("Invalid expression"));
        assert!(lines[2].starts_with("Arithmetic error"));
        assert_eq!(lines[3], "10");
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.evaluated, 1);
    }

    #[test]
    fn test_prompt_is_written() {
        let (out, _) = session("7\n", ReplOptions::default());
        assert_eq!(out, " > 7\n > \n");
    }

    #[test]
    fn test_tree_and_tokens() {
        let options = ReplOptions {
            show_tree: true,
            show_tokens: true,
            no_prompt: true,
        };
        let (out, _) = session("1+2\n", options);
        assert_eq!(
            out,
            "NUMBER: 1\nPLUS:\nNUMBER: 2\nEOF:\n     ( + )\n  .----'----.\n(001)     (002)\n3\n"
        );
    }
}
