#![allow(dead_code)]

pub mod mock_io;
pub mod scripted;

use metaedit::KeyEvent;

/// Key events for each character of `text`.
pub fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars().map(KeyEvent::Printable).collect()
}

/// Owned metadata pairs, for comparing against `to_persistable`.
pub fn metadata(pairs: &[(&str, &str)]) -> metaedit::Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
