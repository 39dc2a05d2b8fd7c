//! Output events recorded while a script plays.

use serde::{Deserialize, Serialize};
use vignette_core::event::{DomainEvent, EventMetadata};

use super::cursor::Cursor;

/// Emitted once when playback starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Started {
    /// Script title, if declared.
    pub title: Option<String>,
    /// Number of scenes.
    pub scene_count: usize,
    /// Number of events across all scenes.
    pub event_count: usize,
}

/// Emitted when the cursor enters a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntered {
    /// Scene position.
    pub scene_index: usize,
    /// Author-facing scene identifier.
    pub scene_id: String,
}

/// Emitted when an event becomes current and rendered successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPresented {
    /// Cursor at presentation.
    pub cursor: Cursor,
    /// Wire tag of the event.
    pub event_type: String,
}

/// Emitted for every in-place step through an inner sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceAdvanced {
    /// Cursor after the step.
    pub cursor: Cursor,
}

/// Emitted when a renderer reported a data error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFailed {
    /// Cursor of the failed event.
    pub cursor: Cursor,
    /// Wire tag of the event.
    pub event_type: String,
    /// Error text.
    pub reason: String,
}

/// Emitted when finished media hands control back to the Director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaContinued {
    /// Cursor of the media event.
    pub cursor: Cursor,
    /// `true` when the Director advanced on its own.
    pub automatic: bool,
}

/// Emitted once when playback runs past the last scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ended {
    /// Number of distinct events presented during the playthrough.
    pub events_presented: u64,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeEventKind {
    /// Playback started.
    Started(Started),
    /// A scene was entered.
    SceneEntered(SceneEntered),
    /// An event was presented.
    EventPresented(EventPresented),
    /// The inner sequence advanced.
    SequenceAdvanced(SequenceAdvanced),
    /// A renderer failed on malformed data.
    RenderFailed(RenderFailed),
    /// Finished media was continued past.
    MediaContinued(MediaContinued),
    /// Playback reached the end.
    Ended(Ended),
}

impl NarrativeEventKind {
    /// Routing name of this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started(_) => "narrative.started",
            Self::SceneEntered(_) => "narrative.scene_entered",
            Self::EventPresented(_) => "narrative.event_presented",
            Self::SequenceAdvanced(_) => "narrative.sequence_advanced",
            Self::RenderFailed(_) => "narrative.render_failed",
            Self::MediaContinued(_) => "narrative.media_continued",
            Self::Ended(_) => "narrative.ended",
        }
    }
}

/// Output event envelope.
#[derive(Debug, Clone)]
pub struct NarrativeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NarrativeEventKind,
}

impl DomainEvent for NarrativeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
