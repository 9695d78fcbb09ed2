//! mentionsh - mention autocompletion in the terminal
//!
//! Starts an interactive line editor that completes `@mentions` from the
//! configured options and prints the mentions of every submitted line as
//! JSON, or runs one of the one-shot subcommands.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! mentionsh --options people.json
//!
//! # One-shot markup
//! echo "hi @alice" | mentionsh render
//! ```

use std::sync::Arc;
use tracing::Level;

use mentionsh::cli::CliInterface;
use mentionsh::error::Result;
use mentionsh::repl::{ReplEngine, SharedState};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the interactive editor
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let config = cli.config();
    let settings = Arc::new(config.mention_settings()?);

    if !cli.args().quiet {
        println!(
            "mentionsh {} - {} option(s), type {} to mention, :help for commands",
            env!("CARGO_PKG_VERSION"),
            settings.options().len(),
            settings.symbol()
        );
    }

    let shared_state = SharedState::with_config(settings, &config.display);
    let mut repl = ReplEngine::new(shared_state, &config.history, config.display.menu_columns)?;
    repl.run()?;

    if !cli.args().quiet {
        println!("Goodbye!");
    }
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Logs are written to stderr.
fn initialize_logging(cli: &CliInterface) {
    let level: Level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
