// calctty: Integer Expression Evaluator with AST Visualization

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use calctty::pipeline::{self, Input};
use calctty::repl::{run_repl, ReplOptions};
use calctty::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--plain [--tree] [--tokens] | <file> | --help]", program_name);
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  {}                    # Interactive TUI", program_name);
    eprintln!(
        "  {} --plain --tree     # Line REPL on stdin, drawing each AST",
        program_name
    );
    eprintln!(
        "  {} expr.txt           # Evaluate a file and print the result",
        program_name
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("calctty");
    let flags: Vec<&str> = args.iter().skip(1).map(|s| s.as_str()).collect();

    match flags.first() {
        None => run_tui(),
        Some(&"--help") | Some(&"-h") => {
            print_usage(program_name);
            Ok(())
        }
        Some(&"--plain") => {
            let mut options = ReplOptions {
                no_prompt: !io::stdin().is_terminal(),
                ..ReplOptions::default()
            };
            for flag in &flags[1..] {
                match *flag {
                    "--tree" => options.show_tree = true,
                    "--tokens" => options.show_tokens = true,
                    other => {
                        eprintln!("Error: Unknown option '{}'", other);
                        print_usage(program_name);
                        std::process::exit(1);
                    }
                }
            }

            let summary = run_repl(io::stdin().lock(), io::stdout().lock(), options)?;
            eprintln!(
                "Evaluated {} expression(s), {} failed.",
                summary.evaluated, summary.failed
            );
            Ok(())
        }
        Some(flag) if flag.starts_with('-') => {
            eprintln!("Error: Unknown option '{}'", flag);
            print_usage(program_name);
            std::process::exit(1);
        }
        Some(path) => run_file(program_name, path),
    }
}

fn run_file(program_name: &str, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        print_usage(program_name);
        std::process::exit(1);
    }

    let file = File::open(path)?;

    eprintln!("Evaluating {}...", path);
    match pipeline::run(Input::Stream(Box::new(BufReader::new(file)))) {
        Ok(value) => {
            println!("{}", value);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_tui() -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new();
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
