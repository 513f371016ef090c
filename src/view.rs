use unicode_width::UnicodeWidthStr;

use crate::engine::EditorState;
use crate::store::RecordStore;
use crate::traits::TextOps;
use crate::types::Mode;

/// Shown in place of the record list when a file carries no metadata.
pub const EMPTY_NOTICE: &str = "No metadata available";

/// The status row under the record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    /// The command line being typed.
    QuitPrompt(String),
    /// Edit mode is active.
    Editing { delete_mode: bool },
    /// Key reminder shown while browsing.
    Hints,
}

impl Footer {
    pub fn label(&self) -> String {
        match self {
            Footer::QuitPrompt(text) => format!("Quit menu {text}"),
            Footer::Editing { delete_mode: false } => "Editing".to_string(),
            Footer::Editing { delete_mode: true } => "Editing (delete mode)".to_string(),
            Footer::Hints => "Ctrl+N edit | Esc command | :x save | :q! discard".to_string(),
        }
    }
}

/// Render-ready projection of the editor, consumed by a [`crate::Display`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub lines: Vec<String>,
    pub footer: Option<Footer>,
    /// `(row, col)` into `lines`, in terminal cells. Only set in Edit mode.
    pub cursor: Option<(usize, usize)>,
    /// First row of the record selected in View mode.
    pub selected_row: Option<usize>,
}

/// Lay out every record as `key: value`, indenting continuation lines under
/// the first character of the value.
pub fn project(store: &RecordStore, state: &EditorState, show_hints: bool) -> ViewModel {
    let mut view = ViewModel::default();
    if store.is_empty() {
        view.lines.push(EMPTY_NOTICE.to_string());
    }

    let selected = match &state.mode {
        Mode::View { selected } => Some(*selected),
        _ => None,
    };
    let active = state.active_key();

    for (idx, record) in store.records().iter().enumerate() {
        let prefix = format!("{}: ", record.key);
        let indent = prefix.width();
        let first_row = view.lines.len();
        if selected == Some(idx) {
            view.selected_row = Some(first_row);
        }

        for (n, text) in record.value.lines().enumerate() {
            if n == 0 {
                view.lines.push(format!("{prefix}{text}"));
            } else {
                view.lines.push(format!("{:indent$}{text}", ""));
            }
        }

        if active == Some(record.key.as_str()) {
            let pos = record.value.clamp(state.cursor);
            let before = record.value.line(pos.line).map_or("", |l| l.prefix(pos.col));
            view.cursor = Some((first_row + pos.line as usize, indent + before.width()));
        }
    }

    view.footer = match &state.mode {
        Mode::Command { text, .. } => Some(Footer::QuitPrompt(text.clone())),
        Mode::Edit { .. } => Some(Footer::Editing {
            delete_mode: state.delete_mode,
        }),
        Mode::View { .. } => show_hints.then_some(Footer::Hints),
    };
    view
}
