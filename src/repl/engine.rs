use std::io::{self, Write};
use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, Keybindings, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::config::HistoryConfig;
use crate::error::{MentionshError, Result};
use crate::formatter::JsonFormatter;
use crate::mention::{MentionEngine, MentionOption, MentionSettings};

use super::completer::MentionCompleter;
use super::highlighter::MentionHighlighter;
use super::hinter::MentionHinter;
use super::prompt::MentionPrompt;
use super::shared_state::SharedState;

const COMPLETION_MENU: &str = "completion_menu";

/// Line commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// List the configured options
    Options,
    /// Turn colored JSON output on or off
    Color(bool),
    /// Show how many mentions were collected
    Stats,
    Help,
    Quit,
    /// Anything else starting with `:`
    Unknown(String),
}

impl ReplCommand {
    /// Parse a `:command` line, `None` for ordinary text
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(':')?;
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let command = match (name, parts.next(), parts.next()) {
            ("options", None, _) => ReplCommand::Options,
            ("color", Some("on"), None) => ReplCommand::Color(true),
            ("color", Some("off"), None) => ReplCommand::Color(false),
            ("stats", None, _) => ReplCommand::Stats,
            ("help", None, _) => ReplCommand::Help,
            ("quit" | "exit", None, _) => ReplCommand::Quit,
            _ => ReplCommand::Unknown(rest.to_string()),
        };
        Some(command)
    }
}

/// What a submitted line amounts to
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank line
    Empty,
    /// A `:command`
    Command(ReplCommand),
    /// Ordinary text with the mentions it contains
    Mentions(Vec<MentionOption>),
}

/// Classify a submitted line and collect its mentions
pub fn process_line(settings: &Arc<MentionSettings>, line: &str) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Empty;
    }
    if let Some(command) = ReplCommand::parse(line) {
        return LineOutcome::Command(command);
    }

    let mut engine = MentionEngine::new(Arc::clone(settings));
    engine.on_text_changed(line, line.len());
    LineOutcome::Mentions(engine.collect())
}

/// Write the response to a line outcome
///
/// # Returns
/// * `Result<bool>` - False when the REPL should stop
pub fn respond(shared_state: &SharedState, outcome: &LineOutcome, out: &mut dyn Write) -> Result<bool> {
    match outcome {
        LineOutcome::Empty => {}
        LineOutcome::Mentions(mentions) => {
            shared_state.record_mentions(mentions.len());
            let formatter = JsonFormatter::new(true, shared_state.get_color_enabled(), 2);
            writeln!(out, "{}", formatter.format_mentions(mentions)?)?;
        }
        LineOutcome::Command(ReplCommand::Quit) => return Ok(false),
        LineOutcome::Command(ReplCommand::Options) => {
            let settings = shared_state.settings();
            if settings.options().is_empty() {
                writeln!(out, "No options configured")?;
            }
            for (idx, option) in settings.options().iter().enumerate() {
                writeln!(out, "{:>3}. {}", idx + 1, settings.display_label(option))?;
            }
        }
        LineOutcome::Command(ReplCommand::Color(enabled)) => {
            shared_state.set_color_enabled(*enabled);
            writeln!(out, "Color output {}", if *enabled { "on" } else { "off" })?;
        }
        LineOutcome::Command(ReplCommand::Stats) => {
            writeln!(out, "{} mention(s) collected", shared_state.get_mentions_collected())?;
        }
        LineOutcome::Command(ReplCommand::Help) => {
            writeln!(out, "Type text with mentions; Tab completes the token at the cursor.")?;
            writeln!(out, "  :options        list options")?;
            writeln!(out, "  :color on|off   toggle colored output")?;
            writeln!(out, "  :stats          mentions collected so far")?;
            writeln!(out, "  :quit, :exit    leave")?;
        }
        LineOutcome::Command(ReplCommand::Unknown(command)) => {
            writeln!(out, "Unknown command: :{} (try :help)", command)?;
        }
    }
    Ok(true)
}

/// REPL engine for interactive mention editing
pub struct ReplEngine {
    /// Line editor for input
    editor: Reedline,

    /// Shared state with the editor components
    shared_state: SharedState,

    /// Whether to continue running
    running: bool,
}

/// Emacs keybindings with the completion menu on Tab
///
/// With `reverse` the menu is drawn above the input, so Tab/BackTab and the
/// arrow keys walk the candidates in the opposite direction.
pub fn completion_keybindings(reverse: bool) -> Keybindings {
    let (next, previous) = if reverse {
        (ReedlineEvent::MenuPrevious, ReedlineEvent::MenuNext)
    } else {
        (ReedlineEvent::MenuNext, ReedlineEvent::MenuPrevious)
    };

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
            next,
        ]),
    );
    keybindings.add_binding(KeyModifiers::SHIFT, KeyCode::BackTab, previous);

    if reverse {
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Up,
            ReedlineEvent::UntilFound(vec![ReedlineEvent::MenuDown, ReedlineEvent::Up]),
        );
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Down,
            ReedlineEvent::UntilFound(vec![ReedlineEvent::MenuUp, ReedlineEvent::Down]),
        );
    }
    keybindings
}

impl ReplEngine {
    /// Create a new REPL engine with shared state
    ///
    /// # Arguments
    /// * `shared_state` - Shared state with the editor components
    /// * `history_config` - History configuration
    /// * `menu_columns` - Columns of the completion menu
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        shared_state: SharedState,
        history_config: &HistoryConfig,
        menu_columns: u16,
    ) -> Result<Self> {
        let settings = shared_state.settings();

        let history = if history_config.persist {
            FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())
        } else {
            FileBackedHistory::new(history_config.max_size)
        };
        let history =
            history.map_err(|e| MentionshError::Editor(format!("Failed to open history: {e}")))?;

        let keybindings = completion_keybindings(settings.reverse());

        let menu = ColumnarMenu::default()
            .with_name(COMPLETION_MENU)
            .with_columns(menu_columns);

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(Box::new(MentionCompleter::new(Arc::clone(&settings))))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(MentionHighlighter::new(
                Arc::clone(&settings),
                shared_state.highlighting_enabled,
            )))
            .with_hinter(Box::new(MentionHinter::new(settings)));

        tracing::debug!(
            persist = history_config.persist,
            max_size = history_config.max_size,
            "line editor ready"
        );

        Ok(Self {
            editor,
            shared_state,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let settings = self.shared_state.settings();
        let prompt = MentionPrompt::new(settings.symbol(), settings.options().len());

        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) => Ok(Some(String::new())),
            Ok(Signal::CtrlD) => Ok(None),
            #[allow(unreachable_patterns)]
            Ok(_) => Ok(None),
            Err(err) => Err(MentionshError::Editor(format!("Read error: {}", err))),
        }
    }

    /// Process user input
    pub fn process_input(&self, input: &str) -> LineOutcome {
        process_line(&self.shared_state.settings(), input)
    }

    /// Run the read-respond loop until `:quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        while self.running {
            let Some(input) = self.read_line()? else {
                break;
            };

            let outcome = self.process_input(&input);
            let mut out = stdout.lock();
            match respond(&self.shared_state, &outcome, &mut out) {
                Ok(true) => {}
                Ok(false) => self.stop(),
                Err(e) => eprintln!("{}", e),
            }
        }
        Ok(())
    }

    /// Stop the REPL
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get shared state reference
    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }
}
