//! Crossterm input and ratatui rendering for the interactive loop.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::key::{KeyCode, KeyEvent, KeyPress, Modifiers};
use crate::traits::{Display, InputSource};
use crate::view::ViewModel;

/// Put the terminal back into cooked mode on the main screen.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Raw-mode, alternate-screen terminal. Restored on drop.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    scroll: usize,
}

impl TerminalDisplay {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, scroll: 0 })
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = restore();
        let _ = self.terminal.show_cursor();
    }
}

impl Display for TerminalDisplay {
    fn render(&mut self, view: &ViewModel) -> io::Result<()> {
        let scroll = &mut self.scroll;
        self.terminal.draw(|f| draw(f, view, scroll))?;
        Ok(())
    }
}

/// Keep `focus` inside a window of `height` rows starting at `scroll`.
fn follow(scroll: usize, focus: usize, height: usize) -> usize {
    if height == 0 || focus < scroll {
        focus
    } else if focus >= scroll + height {
        focus + 1 - height
    } else {
        scroll
    }
}

fn draw(f: &mut Frame, view: &ViewModel, scroll: &mut usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(f.size());
    let body = chunks[0];

    let focus = view.cursor.map(|(row, _)| row).or(view.selected_row).unwrap_or(0);
    *scroll = follow(*scroll, focus, body.height as usize);

    let lines: Vec<Line> = view
        .lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .map(|(row, text)| {
            if view.selected_row == Some(row) {
                Line::styled(text.as_str(), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::raw(text.as_str())
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), body);

    if let Some(footer) = &view.footer {
        let status = Paragraph::new(footer.label()).style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_widget(status, chunks[1]);
    }

    if let Some((row, col)) = view.cursor {
        let row = row.saturating_sub(*scroll);
        if row < body.height as usize && col < body.width as usize {
            f.set_cursor(body.x + col as u16, body.y + row as u16);
        }
    }
}

/// Blocking keyboard input from crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
                && let Some(mapped) = convert_key(key).and_then(KeyEvent::from_press)
            {
                return Ok(mapped);
            }
        }
    }
}

fn convert_key(event: CKeyEvent) -> Option<KeyPress> {
    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    };

    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }
    if event.modifiers.contains(KeyModifiers::META) {
        mods |= Modifiers::META;
    }
    Some(KeyPress { code, mods })
}
