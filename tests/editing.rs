use metaedit::{Engine, KeyEvent, Position, RecordStore};
use pretty_assertions::assert_eq;

mod support;
use support::{metadata, typed};

/// An engine already editing the only record, with the cursor at `cursor`.
fn editing(value: &str, cursor: Position) -> Engine {
    let mut eng = Engine::new(RecordStore::from_pairs([("Notes", value)]));
    eng.handle_input(KeyEvent::ToggleEdit);
    for _ in 0..cursor.line {
        eng.handle_input(KeyEvent::ArrowDown);
    }
    for _ in 0..cursor.col {
        eng.handle_input(KeyEvent::ArrowRight);
    }
    assert_eq!(eng.snapshot().cursor, cursor);
    eng
}

fn value(eng: &Engine) -> Vec<String> {
    eng.store()
        .get("Notes")
        .map(|b| b.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn backspace_at_line_end() {
    let mut eng = editing("Hello", Position::new(0, 5));
    eng.handle_input(KeyEvent::Backspace);
    assert_eq!(value(&eng), vec!["Hell"]);
    assert_eq!(eng.snapshot().cursor, Position::new(0, 4));
}

#[test]
fn backspace_joins_lines() {
    let mut eng = editing("ab\ncd", Position::new(1, 0));
    eng.handle_input(KeyEvent::Backspace);
    assert_eq!(value(&eng), vec!["abcd"]);
    assert_eq!(eng.snapshot().cursor, Position::new(0, 2));
}

#[test]
fn restricted_backspace_keeps_lines() {
    let mut eng = editing("ab\ncd", Position::new(1, 0));
    eng.handle_input(KeyEvent::ToggleDeleteMode);
    eng.handle_input(KeyEvent::Backspace);
    assert_eq!(value(&eng), vec!["ab", "cd"]);
    assert_eq!(eng.snapshot().cursor, Position::new(1, 0));
}

#[test]
fn delete_key_joins_next_line_unless_restricted() {
    let mut eng = editing("ab\ncd", Position::new(0, 2));
    eng.handle_input(KeyEvent::ToggleDeleteMode);
    eng.handle_input(KeyEvent::Delete);
    assert_eq!(value(&eng), vec!["ab", "cd"]);

    eng.handle_input(KeyEvent::ToggleDeleteMode);
    eng.handle_input(KeyEvent::Delete);
    assert_eq!(value(&eng), vec!["abcd"]);
    assert_eq!(eng.snapshot().cursor, Position::new(0, 2));

    eng.handle_input(KeyEvent::Delete);
    assert_eq!(value(&eng), vec!["abd"]);
}

#[test]
fn printable_input_inserts_in_delete_mode() {
    let mut eng = editing("ac", Position::new(0, 1));
    eng.handle_input(KeyEvent::ToggleDeleteMode);
    for event in typed("b") {
        eng.handle_input(event);
    }
    assert_eq!(value(&eng), vec!["abc"]);
    assert_eq!(eng.snapshot().cursor, Position::new(0, 2));
}

#[test]
fn enter_splits_and_backspace_rejoins() {
    let mut eng = editing("hello world", Position::new(0, 5));
    eng.handle_input(KeyEvent::Enter);
    assert_eq!(value(&eng), vec!["hello", " world"]);
    assert_eq!(eng.snapshot().cursor, Position::new(1, 0));

    eng.handle_input(KeyEvent::Backspace);
    assert_eq!(value(&eng), vec!["hello world"]);
    assert_eq!(eng.snapshot().cursor, Position::new(0, 5));
}

#[test]
fn vertical_moves_snap_to_shorter_line() {
    let mut eng = editing("a long line\nab\nanother long one", Position::new(0, 9));
    eng.handle_input(KeyEvent::ArrowDown);
    assert_eq!(eng.snapshot().cursor, Position::new(1, 2));
    // The column is not remembered.
    eng.handle_input(KeyEvent::ArrowDown);
    assert_eq!(eng.snapshot().cursor, Position::new(2, 2));
    eng.handle_input(KeyEvent::ArrowDown);
    assert_eq!(eng.snapshot().cursor, Position::new(2, 2));
}

#[test]
fn horizontal_moves_stay_on_line() {
    let mut eng = editing("ab\ncd", Position::new(1, 0));
    eng.handle_input(KeyEvent::ArrowLeft);
    assert_eq!(eng.snapshot().cursor, Position::new(1, 0));
    for _ in 0..4 {
        eng.handle_input(KeyEvent::ArrowRight);
    }
    assert_eq!(eng.snapshot().cursor, Position::new(1, 2));
}

#[test]
fn empty_value_supports_every_operation() {
    let mut eng = editing("", Position::ZERO);
    for event in [
        KeyEvent::Backspace,
        KeyEvent::Delete,
        KeyEvent::ArrowUp,
        KeyEvent::ArrowDown,
        KeyEvent::ArrowLeft,
        KeyEvent::ArrowRight,
    ] {
        eng.handle_input(event);
        assert_eq!(value(&eng), vec![""]);
        assert_eq!(eng.snapshot().cursor, Position::ZERO);
    }

    eng.handle_input(KeyEvent::Enter);
    assert_eq!(value(&eng), vec!["", ""]);
    assert_eq!(eng.snapshot().cursor, Position::new(1, 0));
}

#[test]
fn edits_stay_on_active_record() {
    let mut eng = Engine::new(RecordStore::from_pairs([("Title", "T"), ("Author", "A")]));
    eng.handle_input(KeyEvent::ToggleEdit);
    // Vertical moves never leave the active value.
    eng.handle_input(KeyEvent::ArrowDown);
    for event in typed("x") {
        eng.handle_input(event);
    }
    assert_eq!(eng.state().active_key(), Some("Title"));
    assert_eq!(eng.store().to_persistable(), metadata(&[("Title", "xT"), ("Author", "A")]));
}

#[test]
fn cursor_is_clamped_when_switching_records() {
    let mut eng = Engine::new(RecordStore::from_pairs([("Title", "a long title"), ("Author", "Al")]));
    eng.handle_input(KeyEvent::ToggleEdit);
    for _ in 0..8 {
        eng.handle_input(KeyEvent::ArrowRight);
    }
    eng.handle_input(KeyEvent::ToggleEdit);
    eng.handle_input(KeyEvent::ArrowDown);
    eng.handle_input(KeyEvent::ToggleEdit);
    assert_eq!(eng.state().active_key(), Some("Author"));
    assert_eq!(eng.snapshot().cursor, Position::new(0, 2));
    assert_eq!(eng.render_model().cursor, Some((1, 10)));
}
