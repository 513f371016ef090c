/// A cursor position within a value buffer.
///
/// Positions are zero-indexed and column values are counted in `char`s,
/// not bytes or grapheme clusters. A column equal to the line length places the cursor
/// after the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in `char`s.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// The current mode of the editor.
///
/// Each variant carries only the state that is meaningful while in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Read-only browsing. `selected` is the record the edit toggle binds to.
    View { selected: usize },
    /// Accumulating a command line. Cancelling resumes `previous`.
    Command { text: String, previous: Box<Mode> },
    /// The value of `key` is being edited.
    Edit { key: String },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::View { selected: 0 }
    }
}

impl Mode {
    pub fn is_view(&self) -> bool {
        matches!(self, Mode::View { .. })
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Mode::Command { .. })
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Mode::Edit { .. })
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `:x` — write the records back.
    Save,
    /// `:q!` — drop every in-memory edit.
    Discard,
}

/// What the host loop should do after an event has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Render and wait for the next event.
    Continue,
    /// Leave the loop.
    Terminate(Outcome),
}
