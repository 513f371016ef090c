use std::mem;

use tracing::{debug, trace};

use crate::buffer::DeletePolicy;
use crate::command::{self, CommandOutcome};
use crate::key::KeyEvent;
use crate::store::RecordStore;
use crate::traits::TextOps;
use crate::types::{Action, Mode, Outcome, Position};
use crate::view::{self, ViewModel};

/// Everything the mode controller tracks between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub mode: Mode,
    /// Position in the active value. Kept (unbound) while not editing.
    pub cursor: Position,
    /// Restricts Backspace/Delete to the current line.
    pub delete_mode: bool,
}

impl EditorState {
    /// The record being edited, if in Edit mode.
    pub fn active_key(&self) -> Option<&str> {
        match &self.mode {
            Mode::Edit { key } => Some(key),
            _ => None,
        }
    }

    /// The pending command line, if in Command mode.
    pub fn command_text(&self) -> Option<&str> {
        match &self.mode {
            Mode::Command { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Apply one input event.
///
/// Only the value of the active record is ever mutated, and only in Edit mode.
pub fn transition(
    mut state: EditorState,
    store: &mut RecordStore,
    event: KeyEvent,
) -> (EditorState, Action) {
    let mode = mem::take(&mut state.mode);
    let (mode, action) = match (mode, event) {
        (mode @ (Mode::View { .. } | Mode::Edit { .. }), KeyEvent::Escape) => {
            debug!(target: "engine", from = ?mode, "command line opened");
            let mode = Mode::Command {
                text: String::new(),
                previous: Box::new(mode),
            };
            (mode, Action::Continue)
        }
        (Mode::Command { text, previous }, event) => command_input(text, *previous, store, event),
        (Mode::View { selected }, event) => (view_input(selected, &mut state, store, event), Action::Continue),
        (Mode::Edit { key }, event) => (edit_input(key, &mut state, store, event), Action::Continue),
    };
    state.mode = mode;
    (state, action)
}

fn command_input(
    mut text: String,
    previous: Mode,
    store: &RecordStore,
    event: KeyEvent,
) -> (Mode, Action) {
    match event {
        KeyEvent::Escape => (previous, Action::Continue),
        KeyEvent::Enter => match command::parse(&text) {
            CommandOutcome::Save => (previous, Action::Terminate(Outcome::Save)),
            CommandOutcome::Discard => (previous, Action::Terminate(Outcome::Discard)),
            CommandOutcome::Unrecognized => {
                debug!(target: "engine", command = %text, "unrecognized command");
                let selected = match previous {
                    Mode::Edit { key } => store.index_of(&key).unwrap_or(0),
                    Mode::View { selected } => selected,
                    Mode::Command { .. } => 0,
                };
                (Mode::View { selected }, Action::Continue)
            }
        },
        KeyEvent::Backspace => {
            text.pop();
            (
                Mode::Command {
                    text,
                    previous: Box::new(previous),
                },
                Action::Continue,
            )
        }
        KeyEvent::Printable(c) => {
            text.push(c);
            (
                Mode::Command {
                    text,
                    previous: Box::new(previous),
                },
                Action::Continue,
            )
        }
        _ => (
            Mode::Command {
                text,
                previous: Box::new(previous),
            },
            Action::Continue,
        ),
    }
}

fn view_input(selected: usize, state: &mut EditorState, store: &RecordStore, event: KeyEvent) -> Mode {
    match event {
        KeyEvent::ToggleEdit => {
            let Some(key) = store.key_at(selected) else {
                return Mode::View { selected };
            };
            if let Some(buffer) = store.get(key) {
                state.cursor = buffer.clamp(state.cursor);
            }
            debug!(target: "engine", key, "editing");
            Mode::Edit { key: key.to_string() }
        }
        KeyEvent::ArrowUp => Mode::View {
            selected: selected.saturating_sub(1),
        },
        KeyEvent::ArrowDown => Mode::View {
            selected: (selected + 1).min(store.len().saturating_sub(1)),
        },
        _ => Mode::View { selected },
    }
}

fn edit_input(key: String, state: &mut EditorState, store: &mut RecordStore, event: KeyEvent) -> Mode {
    match event {
        KeyEvent::ToggleEdit => {
            let selected = store.index_of(&key).unwrap_or(0);
            return Mode::View { selected };
        }
        KeyEvent::ToggleDeleteMode => {
            state.delete_mode = !state.delete_mode;
            debug!(target: "engine", delete_mode = state.delete_mode, "delete mode toggled");
            return Mode::Edit { key };
        }
        _ => {}
    }

    let Some(buffer) = store.get_mut(&key) else {
        return Mode::View { selected: 0 };
    };
    let policy = DeletePolicy::from_delete_mode(state.delete_mode);
    let before = state.cursor;
    state.cursor = match event {
        KeyEvent::ArrowUp => buffer.move_up(before),
        KeyEvent::ArrowDown => buffer.move_down(before),
        KeyEvent::ArrowLeft => buffer.move_left(before),
        KeyEvent::ArrowRight => buffer.move_right(before),
        KeyEvent::Printable(c) => buffer.insert_char(before, c),
        KeyEvent::Enter => buffer.insert_newline(before),
        KeyEvent::Backspace => buffer.backspace(before, policy),
        KeyEvent::Delete => buffer.delete_forward(before, policy),
        _ => buffer.clamp(before),
    };
    trace!(
        target: "engine",
        ?event,
        line = before.line,
        col = before.col,
        to_line = state.cursor.line,
        to_col = state.cursor.col,
        "edit"
    );
    Mode::Edit { key }
}

/// Read-only view of the engine, for hosts and tests.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub cursor: Position,
    pub delete_mode: bool,
}

pub struct EngineBuilder {
    delete_mode: bool,
    show_key_hints: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            delete_mode: false,
            show_key_hints: true,
        }
    }
}

impl EngineBuilder {
    pub fn delete_mode(mut self, delete_mode: bool) -> Self {
        self.delete_mode = delete_mode;
        self
    }

    pub fn show_key_hints(mut self, show: bool) -> Self {
        self.show_key_hints = show;
        self
    }

    pub fn build(self, store: RecordStore) -> Engine {
        Engine {
            store,
            state: EditorState {
                delete_mode: self.delete_mode,
                ..EditorState::default()
            },
            show_key_hints: self.show_key_hints,
        }
    }
}

/// Owns the records and the editor state for one session.
#[derive(Debug, Clone)]
pub struct Engine {
    store: RecordStore,
    state: EditorState,
    show_key_hints: bool,
}

impl Engine {
    pub fn new(store: RecordStore) -> Self {
        EngineBuilder::default().build(store)
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn handle_input(&mut self, event: KeyEvent) -> Action {
        let state = mem::take(&mut self.state);
        let (state, action) = transition(state, &mut self.store, event);
        self.state = state;
        action
    }

    pub fn render_model(&self) -> ViewModel {
        view::project(&self.store, &self.state, self.show_key_hints)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.state.mode.clone(),
            cursor: self.state.cursor,
            delete_mode: self.state.delete_mode,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }
}
