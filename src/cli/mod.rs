//! Command-line interface for mentionsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - One-shot subcommands (render, extract, config, completion)
//! - Mode selection (subcommand vs interactive editor)

pub mod completion;

use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::{ConfigError, MentionshError, Result};
use crate::formatter::{JsonFormatter, extract_mentions, render};

/// Mention-aware line editor
#[derive(Parser, Debug)]
#[command(
    name = "mentionsh",
    version,
    about = "Mention autocompletion in the terminal",
    long_about = "An interactive line editor that completes @mentions from a configured option
list, and one-shot commands to render and extract mention markup."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Options file (JSON array or TOML with an `options` array)
    #[arg(short = 'o', long = "options", value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Trigger symbol
    #[arg(short = 's', long, value_name = "CHAR")]
    pub symbol: Option<char>,

    /// Display the option list above the input
    #[arg(long)]
    pub reverse: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for mentionsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Print overlay markup for a text (reads stdin without TEXT)
    Render {
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Print the mentions found in overlay markup as JSON (reads stdin without MARKUP)
    Extract {
        #[arg(value_name = "MARKUP")]
        markup: Option<String>,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match Config::load_from_file(args.config_file.as_deref()) {
            Ok(config) => config,
            Err(MentionshError::Config(ConfigError::InvalidFormat(msg))) => {
                eprintln!("Warning: Could not parse configuration file: {}", msg);
                eprintln!("Using default configuration instead.");
                Config::default()
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Explicit configuration file, if any
    pub fn config_path(&self) -> Option<&std::path::Path> {
        self.args.config_file.as_deref()
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_mention_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_mention_args(config: &mut Config, args: &CliArgs) {
        if let Some(symbol) = args.symbol {
            config.mention.symbol = symbol;
        }
        if args.reverse {
            config.mention.reverse = true;
        }
        if let Some(path) = &args.options_file {
            config.mention.options_file = Some(path.clone());
        }
    }

    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
        }
    }

    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands, writing their output to stdout
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_subcommand(&mut out)
    }

    /// Handle subcommands, writing their output to `out`
    pub fn write_subcommand(&self, out: &mut dyn Write) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version(out)?;
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell, out)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate, out)?;
                Ok(true)
            }
            Some(Commands::Render { text }) => {
                let text = Self::input_or_stdin(text.as_deref())?;
                writeln!(out, "{}", self.render_text(&text)?)?;
                Ok(true)
            }
            Some(Commands::Extract { markup }) => {
                let markup = Self::input_or_stdin(markup.as_deref())?;
                writeln!(out, "{}", self.extract_markup(&markup)?)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Overlay markup for `text` with the configured options
    pub fn render_text(&self, text: &str) -> Result<String> {
        let options = self.config.load_options()?;
        Ok(render(text, &options, self.config.mention.symbol))
    }

    /// Mentions of `markup` as a JSON array
    pub fn extract_markup(&self, markup: &str) -> Result<String> {
        let mentions = extract_mentions(markup);
        tracing::debug!(count = mentions.len(), "extracted mentions");
        JsonFormatter::new(true, self.config.display.color_output, 2).format_mentions(&mentions)
    }

    fn input_or_stdin(arg: Option<&str>) -> Result<String> {
        if let Some(arg) = arg {
            return Ok(arg.to_string());
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed);
        Ok(buffer)
    }

    fn show_version(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "mentionsh version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Rust version: {}", env!("CARGO_PKG_RUST_VERSION"))?;
        Ok(())
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool, out: &mut dyn Write) -> Result<()> {
        if validate {
            self.validate_config_file(out)?;
        }

        if show || !validate {
            self.show_config(out)?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self, out: &mut dyn Write) -> Result<()> {
        let path = self.get_config_path();
        writeln!(out, "Validating configuration file: {}", path.display())?;

        if !path.exists() {
            writeln!(out, "Configuration file does not exist, defaults apply")?;
            return Ok(());
        }

        match Config::load_from_file(Some(path.as_path())) {
            Ok(config) => match config.validate().and_then(|_| config.load_options()) {
                Ok(options) => {
                    writeln!(out, "Configuration is valid ({} options)", options.len())?
                }
                Err(e) => writeln!(out, "Configuration validation failed: {}", e)?,
            },
            Err(e) => writeln!(out, "Failed to load configuration: {}", e)?,
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Configuration file: {}", self.get_config_path().display())?;
        writeln!(out)?;
        writeln!(out, "=== Effective Configuration ===")?;
        writeln!(out)?;
        writeln!(out, "{}", self.config.to_toml_string()?)?;
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }
}
