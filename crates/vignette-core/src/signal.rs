//! Signals delivered by the host into the engine.

use serde::{Deserialize, Serialize};

use crate::media::PlaybackId;
use crate::scheduler::TimerId;

/// An input the engine reacts to. Each signal is processed to completion
/// before the next one is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Generic "continue" input (click, tap, key).
    Continue,
    /// Explicit skip of the active media.
    Skip,
    /// Request to enter the next media phase.
    PhaseTrigger,
    /// A media resource began playing.
    MediaStarted(PlaybackId),
    /// A media resource reached its natural end.
    MediaEnded(PlaybackId),
    /// A media resource failed to play.
    MediaFailed(PlaybackId, String),
    /// A scheduled timer elapsed.
    TimerElapsed(TimerId),
}

impl Signal {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Skip => "skip",
            Self::PhaseTrigger => "phase_trigger",
            Self::MediaStarted(_) => "media_started",
            Self::MediaEnded(_) => "media_ended",
            Self::MediaFailed(..) => "media_failed",
            Self::TimerElapsed(_) => "timer_elapsed",
        }
    }
}
