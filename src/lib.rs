pub mod buffer;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod formats;
pub mod key;
pub mod session;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod types;
pub mod view;

pub use crate::buffer::{Buffer, DeletePolicy, Line};
pub use crate::command::{CommandOutcome, parse};
pub use crate::engine::{EditorState, Engine, EngineBuilder, EngineSnapshot, transition};
pub use crate::error::MetadataError;
pub use crate::key::{KeyCode, KeyEvent, KeyPress, Modifiers};
pub use crate::store::{Record, RecordStore};
pub use crate::traits::{Display, InputSource, Metadata, MetadataSink, MetadataSource, TextOps};
pub use crate::types::{Action, Mode, Outcome, Position};
pub use crate::view::{Footer, ViewModel};
