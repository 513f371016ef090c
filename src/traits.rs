use std::io;
use std::path::Path;

use crate::error::MetadataError;
use crate::key::KeyEvent;
use crate::types::Position;
use crate::view::ViewModel;

/// Ordered key/value pairs as read from, or written to, a file.
pub type Metadata = Vec<(String, String)>;

/// Line-oriented text queries plus the cursor moves built on them.
///
/// Every move clamps instead of failing; none of them crosses a line boundary
/// horizontally.
pub trait TextOps {
    fn line_count(&self) -> u32;
    fn line_len(&self, line: u32) -> u32; // char columns

    fn clamp(&self, pos: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }

    fn move_left(&self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        Position {
            line: pos.line,
            col: pos.col.saturating_sub(1),
        }
    }

    fn move_right(&self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        Position {
            line: pos.line,
            col: (pos.col + 1).min(self.line_len(pos.line)),
        }
    }

    // Vertical moves re-clamp the column; there is no preferred column.
    fn move_up(&self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        self.clamp(Position {
            line: pos.line.saturating_sub(1),
            col: pos.col,
        })
    }

    fn move_down(&self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        self.clamp(Position {
            line: pos.line.saturating_add(1),
            col: pos.col,
        })
    }

    fn line_start(&self, line: u32) -> Position {
        self.clamp(Position { line, col: 0 })
    }

    fn line_end(&self, line: u32) -> Position {
        self.clamp(Position { line, col: u32::MAX })
    }
}

/// Reads the metadata attached to a file.
pub trait MetadataSource {
    /// Load every key/value pair, preserving the file's key order.
    fn load(&self, path: &Path) -> Result<Metadata, MetadataError>;
}

/// Writes metadata back to a file as a complete rewrite.
pub trait MetadataSink {
    fn persist(&self, path: &Path, metadata: &Metadata) -> Result<(), MetadataError>;
}

/// Draws a render-ready projection of the editor.
pub trait Display {
    fn render(&mut self, view: &ViewModel) -> io::Result<()>;
}

/// Blocking source of editor input.
pub trait InputSource {
    fn next_event(&mut self) -> io::Result<KeyEvent>;
}
