use std::fmt;

use crate::traits::TextOps;
use crate::types::Position;

/// One line of a value, addressed by `char` column.
///
/// Edits splice the backing `String` in place at the byte offset of the
/// target column; a line never contains `'\n'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    pub fn new(text: &str) -> Self {
        debug_assert!(!text.contains('\n'));
        Self {
            text: text.to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> u32 {
        self.text.chars().count() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text before column `col`.
    pub fn prefix(&self, col: u32) -> &str {
        &self.text[..self.byte_offset(col)]
    }

    fn byte_offset(&self, col: u32) -> usize {
        self.text
            .char_indices()
            .nth(col as usize)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    fn insert(&mut self, col: u32, ch: char) {
        let at = self.byte_offset(col);
        self.text.insert(at, ch);
    }

    /// Remove the char at `col`. Returns `false` past the end of the line.
    fn remove(&mut self, col: u32) -> bool {
        let start = self.byte_offset(col);
        if start >= self.text.len() {
            return false;
        }
        let end = self.byte_offset(col + 1);
        self.text.replace_range(start..end, "");
        true
    }

    fn split_off(&mut self, col: u32) -> Line {
        let at = self.byte_offset(col);
        Line {
            text: self.text.split_off(at),
        }
    }

    fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
    }
}

/// Which way Backspace and Delete behave at a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Deleting across a line boundary merges the two lines.
    #[default]
    Join,
    /// Deletion stays within the current line.
    Restricted,
}

impl DeletePolicy {
    pub fn from_delete_mode(delete_mode: bool) -> Self {
        if delete_mode {
            DeletePolicy::Restricted
        } else {
            DeletePolicy::Join
        }
    }
}

/// The multi-line value of one record.
///
/// Always holds at least one line; an empty value is a single empty line.
/// Every mutation takes the cursor position and returns where the cursor
/// lands afterwards. Positions outside the buffer are clamped first, so no
/// edit can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self {
            lines: vec![Line::default()],
        }
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `text` into lines on `'\n'`, dropping a trailing `'\r'` from each.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| Line::new(line.strip_suffix('\r').unwrap_or(line)))
            .collect();
        Self { lines }
    }

    /// Rejoin the lines with a single `'\n'`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(line.as_str());
        }
        out
    }

    pub fn line(&self, line: u32) -> Option<&Line> {
        self.lines.get(line as usize)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::as_str)
    }

    pub fn insert_char(&mut self, pos: Position, ch: char) -> Position {
        if ch == '\n' {
            return self.insert_newline(pos);
        }
        let pos = self.clamp(pos);
        let line = &mut self.lines[pos.line as usize];
        line.insert(pos.col, ch);
        Position::new(pos.line, pos.col + 1)
    }

    pub fn insert_newline(&mut self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        let idx = pos.line as usize;
        let tail = self.lines[idx].split_off(pos.col);
        self.lines.insert(idx + 1, tail);
        Position::new(pos.line + 1, 0)
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self, pos: Position, policy: DeletePolicy) -> Position {
        let pos = self.clamp(pos);
        if pos.col > 0 {
            self.lines[pos.line as usize].remove(pos.col - 1);
            return Position::new(pos.line, pos.col - 1);
        }
        if pos.line == 0 || policy == DeletePolicy::Restricted {
            return pos;
        }
        let idx = pos.line as usize;
        let current = self.lines.remove(idx);
        let previous = &mut self.lines[idx - 1];
        let col = previous.len();
        previous.append(current);
        Position::new(pos.line - 1, col)
    }

    /// Delete the char under the cursor. The cursor never moves.
    pub fn delete_forward(&mut self, pos: Position, policy: DeletePolicy) -> Position {
        let pos = self.clamp(pos);
        let idx = pos.line as usize;
        if self.lines[idx].remove(pos.col) {
            return pos;
        }
        if policy == DeletePolicy::Restricted || idx + 1 >= self.lines.len() {
            return pos;
        }
        let next = self.lines.remove(idx + 1);
        self.lines[idx].append(next);
        pos
    }
}

impl TextOps for Buffer {
    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_len(&self, line: u32) -> u32 {
        self.line(line).map_or(0, Line::len)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
