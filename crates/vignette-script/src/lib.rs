//! Vignette — Script Model.
//!
//! Immutable in-memory representation of a loaded narrative: scenes, their
//! ordered events, and the inner sequence items some events carry. Also
//! responsible for reading script files from disk.

pub mod loader;
pub mod model;
mod raw;

pub use loader::{LoadedScript, ScriptFormat, load_script, parse_script, script_digest};
pub use model::{
    DialogueLine, Event, EventBody, ItemShape, MediaEvent, MessageMetadata, OverlayContent,
    OverlayItem, Phase, Scene, Script, SequenceItem, TimedDialogue,
};
