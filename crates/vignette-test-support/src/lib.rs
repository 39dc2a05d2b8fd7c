//! Shared test doubles and fixtures for the Vignette narrative engine.

mod clock;
mod fixtures;
mod media;
mod scheduler;
mod stage;

pub use clock::FixedClock;
pub use fixtures::{chat_event, cg_event, combat_event, narration_event, script_of};
pub use media::{MediaCall, ScriptedMediaPlayer};
pub use scheduler::ManualScheduler;
pub use stage::RecordingStage;
