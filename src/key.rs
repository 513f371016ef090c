/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key, as typed (hosts should not normalize case).
    Char(char),
    /// The Escape key, used to open the command line.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key.
    Backspace,
    /// The forward Delete key.
    Delete,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A raw key press with optional modifiers, before it is given any meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: Modifiers::CTRL,
        }
    }
}

/// Input events consumed by the editing engine.
///
/// Raw key presses are translated into these exactly once, at the input
/// boundary, so the engine never looks at key codes or modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Printable(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    /// Switch between viewing and editing (Ctrl+N).
    ToggleEdit,
    /// Flip the restricted deletion policy while editing (Ctrl+D).
    ToggleDeleteMode,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl KeyEvent {
    /// Translate a key press, returning `None` for chords the editor ignores.
    pub fn from_press(press: KeyPress) -> Option<KeyEvent> {
        let chord = press.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        let event = match press.code {
            KeyCode::Char(c) if chord => {
                if !press.mods.contains(Modifiers::CTRL) {
                    return None;
                }
                match c.to_ascii_lowercase() {
                    'n' => KeyEvent::ToggleEdit,
                    'd' => KeyEvent::ToggleDeleteMode,
                    _ => return None,
                }
            }
            KeyCode::Char(c) if c.is_control() => return None,
            KeyCode::Char(c) => KeyEvent::Printable(c),
            KeyCode::Esc => KeyEvent::Escape,
            KeyCode::Enter => KeyEvent::Enter,
            KeyCode::Backspace => KeyEvent::Backspace,
            KeyCode::Delete => KeyEvent::Delete,
            KeyCode::Up => KeyEvent::ArrowUp,
            KeyCode::Down => KeyEvent::ArrowDown,
            KeyCode::Left => KeyEvent::ArrowLeft,
            KeyCode::Right => KeyEvent::ArrowRight,
        };
        Some(event)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        KeyEvent::Printable(c)
    }
}
