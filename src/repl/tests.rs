use std::sync::Arc;

use reedline::{KeyCode, KeyModifiers, ReedlineEvent};

use super::*;
use crate::config::DisplayConfig;
use crate::mention::{MentionOption, MentionSettings};

fn settings() -> Arc<MentionSettings> {
    Arc::new(MentionSettings::new(vec![
        MentionOption::record("alice").with_field("id", 1),
        MentionOption::from("bob"),
    ]))
}

fn plain_state() -> SharedState {
    let display = DisplayConfig {
        color_output: false,
        ..DisplayConfig::default()
    };
    SharedState::with_config(settings(), &display)
}

fn respond_to(state: &SharedState, line: &str) -> (bool, String) {
    let outcome = process_line(&state.settings(), line);
    let mut out = Vec::new();
    let keep_running = respond(state, &outcome, &mut out).unwrap();
    (keep_running, String::from_utf8(out).unwrap())
}

#[test]
fn test_shared_state_creation() {
    let state = SharedState::new(settings());
    assert!(state.get_color_enabled());
    assert!(state.highlighting_enabled);
    assert_eq!(state.get_mentions_collected(), 0);
    assert_eq!(state.settings().options().len(), 2);
}

#[test]
fn test_shared_state_color_toggle_is_shared() {
    let state = SharedState::new(settings());
    let clone = state.clone();
    clone.set_color_enabled(false);
    assert!(!state.get_color_enabled());
}

#[test]
fn test_parse_commands() {
    assert_eq!(ReplCommand::parse(":options"), Some(ReplCommand::Options));
    assert_eq!(ReplCommand::parse("  :quit "), Some(ReplCommand::Quit));
    assert_eq!(ReplCommand::parse(":exit"), Some(ReplCommand::Quit));
    assert_eq!(ReplCommand::parse(":color off"), Some(ReplCommand::Color(false)));
    assert_eq!(
        ReplCommand::parse(":color blue"),
        Some(ReplCommand::Unknown("color blue".to_string()))
    );
    assert_eq!(ReplCommand::parse("hello @bob"), None);
    assert_eq!(ReplCommand::parse(":) nice"), None);
}

#[test]
fn test_process_line_collects_mentions() {
    let outcome = process_line(&settings(), "ping @bob and @alice, @carol");
    assert_eq!(
        outcome,
        LineOutcome::Mentions(vec![MentionOption::from("bob")])
    );

    let outcome = process_line(&settings(), "ping @bob and @alice");
    let LineOutcome::Mentions(mentions) = outcome else {
        panic!("expected mentions");
    };
    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[1].label(), "alice");
}

#[test]
fn test_process_blank_line() {
    assert_eq!(process_line(&settings(), "   "), LineOutcome::Empty);
}

#[test]
fn test_respond_prints_json_and_counts() {
    let state = plain_state();
    let (keep_running, output) = respond_to(&state, "hi @bob");
    assert!(keep_running);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, serde_json::json!(["bob"]));
    assert_eq!(state.get_mentions_collected(), 1);

    let (_, output) = respond_to(&state, ":stats");
    assert_eq!(output, "1 mention(s) collected\n");
}

#[test]
fn test_respond_lists_options() {
    let state = plain_state();
    let (_, output) = respond_to(&state, ":options");
    assert_eq!(output, "  1. alice\n  2. bob\n");
}

#[test]
fn test_respond_to_quit() {
    let state = plain_state();
    let (keep_running, output) = respond_to(&state, ":quit");
    assert!(!keep_running);
    assert!(output.is_empty());
}

#[test]
fn test_respond_to_color_and_unknown() {
    let state = SharedState::new(settings());
    let (_, output) = respond_to(&state, ":color off");
    assert_eq!(output, "Color output off\n");
    assert!(!state.get_color_enabled());

    let (keep_running, output) = respond_to(&state, ":frobnicate");
    assert!(keep_running);
    assert!(output.starts_with("Unknown command: :frobnicate"));
}

fn tab_events(reverse: bool) -> (Option<ReedlineEvent>, Option<ReedlineEvent>) {
    let keybindings = completion_keybindings(reverse);
    (
        keybindings.find_binding(KeyModifiers::NONE, KeyCode::Tab),
        keybindings.find_binding(KeyModifiers::SHIFT, KeyCode::BackTab),
    )
}

#[test]
fn test_tab_walks_menu_forward() {
    let (tab, back_tab) = tab_events(false);
    assert_eq!(
        tab,
        Some(ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]))
    );
    assert_eq!(back_tab, Some(ReedlineEvent::MenuPrevious));
}

#[test]
fn test_reverse_inverts_menu_navigation() {
    let (tab, back_tab) = tab_events(true);
    assert_eq!(
        tab,
        Some(ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuPrevious,
        ]))
    );
    assert_eq!(back_tab, Some(ReedlineEvent::MenuNext));

    let keybindings = completion_keybindings(true);
    assert_eq!(
        keybindings.find_binding(KeyModifiers::NONE, KeyCode::Up),
        Some(ReedlineEvent::UntilFound(vec![
            ReedlineEvent::MenuDown,
            ReedlineEvent::Up,
        ]))
    );
}
