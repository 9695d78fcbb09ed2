use std::sync::{Arc, Mutex};

use mentionsh::config::{Config, load_options_file};
use mentionsh::mention::{EditorKey, find_all_tokens, find_token_at};
use mentionsh::{
    CommitError, Direction, MentionEngine, MentionOption, MentionSettings, extract_mentions,
    render,
};

fn people() -> Vec<MentionOption> {
    vec![
        MentionOption::record("alice").with_field("id", 1),
        MentionOption::record("albert").with_field("id", 2),
        MentionOption::record("bob").with_field("id", 3),
    ]
}

// Simulates a host typing one character at a time
fn type_text(engine: &mut MentionEngine, text: &str) {
    let mut buffer = engine.text().to_string();
    let mut cursor = engine.cursor();
    for ch in text.chars() {
        buffer.insert(cursor, ch);
        cursor += ch.len_utf8();
        engine.on_text_changed(&buffer, cursor);
    }
}

#[test]
fn typing_and_committing_two_mentions() {
    let mut engine = MentionEngine::new(Arc::new(MentionSettings::new(people())));

    type_text(&mut engine, "hey @");
    assert!(engine.is_composing());
    assert_eq!(engine.candidates().len(), 3);

    type_text(&mut engine, "al");
    assert_eq!(engine.candidates().len(), 2);
    engine.on_key(EditorKey::Down);
    let outcome = engine.on_key(EditorKey::Enter);
    assert!(outcome.handled);
    assert_eq!(engine.text(), "hey @albert ");

    type_text(&mut engine, "and @b");
    let commit = engine.commit_hovered().unwrap();
    assert_eq!(commit.text, "hey @albert and @bob ");
    assert_eq!(commit.cursor, commit.text.len());

    let labels: Vec<String> = engine
        .collect()
        .iter()
        .map(|option| option.label().to_string())
        .collect();
    assert_eq!(labels, vec!["albert", "bob"]);
}

#[test]
fn commit_in_the_middle_of_text() {
    let mut engine = MentionEngine::new(Arc::new(MentionSettings::new(people())));
    engine.on_text_changed("hi @ali how are you", 5);
    let commit = engine.commit_hovered().unwrap();
    assert_eq!(commit.text, "hi @alice  how are you");
    assert_eq!(commit.cursor, 10);
    assert!(!engine.is_composing());
}

#[test]
fn idle_engine_refuses_commits() {
    let mut engine = MentionEngine::new(Arc::new(MentionSettings::new(people())));
    engine.on_text_changed("hi@bob", 6);
    assert!(!engine.is_composing());
    assert_eq!(engine.commit_hovered(), Err(CommitError::InvalidState));
    assert_eq!(engine.on_navigate(Direction::Down).hover, 0);
}

#[test]
fn update_hook_sees_every_change() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut engine = MentionEngine::new(Arc::new(MentionSettings::new(people())))
        .with_update_hook(move |state| sink.lock().unwrap().push(state.candidates.len()));

    type_text(&mut engine, "@bo");
    engine.commit_hovered().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![3, 1, 1, 0]);
}

#[test]
fn render_then_extract_round_trips() {
    let options = people();
    let markup = render("@bob met @alice and @nobody", &options, '@');
    assert!(markup.ends_with("@nobody&nbsp;"));
    assert_eq!(
        extract_mentions(&markup),
        vec![options[2].clone(), options[0].clone()]
    );
}

#[test]
fn scanner_tokens_never_contain_separators() {
    let text = "a @b\n@c\u{2028}@d  e@f @";
    for token in find_all_tokens(text, '@') {
        assert!(token.text.starts_with('@'));
        assert!(!token.text.contains([' ', '\n', '\u{2028}']));
        assert_eq!(&text[token.span()], token.text);
    }
    assert_eq!(find_all_tokens(text, '@').len(), 4);

    for cursor in 0..=text.len() {
        if let Some(token) = find_token_at(text, cursor) {
            if text.is_char_boundary(cursor) {
                assert!(token.contains(cursor));
            }
        }
    }
}

#[test]
fn config_options_feed_the_engine() {
    let dir = tempfile::TempDir::new().unwrap();
    let options_path = dir.path().join("people.json");
    std::fs::write(&options_path, r#"["carol", {"name": "dave", "team": "ops"}]"#).unwrap();

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[mention]\nsymbol = \"#\"\noptions = [\"alice\"]\noptions_file = {:?}\n",
            options_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = Config::load_from_file(Some(config_path.as_path())).unwrap();
    assert_eq!(load_options_file(&options_path).unwrap().len(), 2);

    let mut engine = MentionEngine::new(Arc::new(config.mention_settings().unwrap()));
    engine.on_text_changed("ping #da", 8);
    let commit = engine.commit_hovered().unwrap();
    assert_eq!(commit.text, "ping #dave ");
    assert_eq!(engine.collect()[0].label(), "dave");
}
