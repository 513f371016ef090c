use std::io;
use std::path::Path;

use tracing::info;

use crate::engine::Engine;
use crate::error::MetadataError;
use crate::store::RecordStore;
use crate::traits::{Display, InputSource, MetadataSink};
use crate::types::{Action, Outcome};

/// Drive the engine until the user saves or discards.
///
/// Each iteration renders once and consumes exactly one event.
pub fn run<D, I>(engine: &mut Engine, display: &mut D, input: &mut I) -> io::Result<Outcome>
where
    D: Display + ?Sized,
    I: InputSource + ?Sized,
{
    loop {
        display.render(&engine.render_model())?;
        let event = input.next_event()?;
        if let Action::Terminate(outcome) = engine.handle_input(event) {
            info!(target: "session", ?outcome, "session ended");
            return Ok(outcome);
        }
    }
}

/// Hand the records to `sink` on [`Outcome::Save`]; drop them on
/// [`Outcome::Discard`].
pub fn conclude<S>(outcome: Outcome, store: &RecordStore, sink: &S, path: &Path) -> Result<(), MetadataError>
where
    S: MetadataSink + ?Sized,
{
    match outcome {
        Outcome::Save => store.persist(sink, path),
        Outcome::Discard => {
            info!(target: "session", path = %path.display(), "edits discarded");
            Ok(())
        }
    }
}
