use std::collections::VecDeque;
use std::io;

use metaedit::{Display, InputSource, KeyEvent, ViewModel};

/// Replays a fixed list of events, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> io::Result<KeyEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

/// Keeps every frame it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<ViewModel>,
}

impl RecordingDisplay {
    pub fn last(&self) -> &ViewModel {
        self.frames.last().expect("at least one frame")
    }
}

impl Display for RecordingDisplay {
    fn render(&mut self, view: &ViewModel) -> io::Result<()> {
        self.frames.push(view.clone());
        Ok(())
    }
}
