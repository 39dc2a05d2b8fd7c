//! Playback error types.

use thiserror::Error;

/// Top-level error type for script loading and playback.
///
/// Only `EmptyScript`, `EmptyScene` and `Load` are fatal, and only to start-up.
/// The remaining variants are contained within a single event's render cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The script contains no scenes.
    #[error("script has no scenes")]
    EmptyScript,

    /// A scene contains no events.
    #[error("scene {scene_id} has no events")]
    EmptyScene {
        /// The offending scene.
        scene_id: String,
    },

    /// A required field of an event is missing or malformed.
    #[error("data error: {0}")]
    Data(String),

    /// A media resource could not be started.
    #[error("resource error: {0}")]
    Resource(String),

    /// An event carried a type tag the engine does not know.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The script source could not be read or parsed.
    #[error("load error: {0}")]
    Load(String),
}

impl PlaybackError {
    /// Returns `true` for errors that must abort start-up.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EmptyScript | Self::EmptyScene { .. } | Self::Load(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_startup_errors_are_fatal() {
        assert!(PlaybackError::EmptyScript.is_fatal());
        assert!(
            PlaybackError::EmptyScene {
                scene_id: "s1".into()
            }
            .is_fatal()
        );
        assert!(PlaybackError::Load("missing file".into()).is_fatal());
        assert!(!PlaybackError::Data("no text".into()).is_fatal());
        assert!(!PlaybackError::Resource("codec".into()).is_fatal());
        assert!(!PlaybackError::UnknownEventType("dialogue_free_view".into()).is_fatal());
    }

    #[test]
    fn test_display_includes_scene_id() {
        let err = PlaybackError::EmptyScene {
            scene_id: "prologue".into(),
        };
        assert_eq!(err.to_string(), "scene prologue has no events");
    }
}
