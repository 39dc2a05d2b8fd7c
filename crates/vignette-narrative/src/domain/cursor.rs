//! The traversal cursor and the pure advance step.

use std::fmt;

use serde::{Deserialize, Serialize};
use vignette_script::{Event, Script};

/// Position of what is currently displayed.
///
/// Field order matters: the derived ordering is lexicographic over
/// (scene, event, sequence), which is the playback order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// Index into `Script::scenes`. Equal to the scene count once ended.
    pub scene_index: usize,
    /// Index into the current scene's events.
    pub event_index: usize,
    /// Index into the current event's inner sequence, 0 when it has none.
    pub sequence_index: usize,
}

/// Outcome of one advance step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Same event, next inner sequence item.
    InPlace(Cursor),
    /// Next event in the same scene.
    NextEvent(Cursor),
    /// First event of the next scene.
    NextScene(Cursor),
    /// Past the last event of the last scene.
    Exhausted(Cursor),
}

impl Cursor {
    /// The starting position.
    pub const START: Self = Self {
        scene_index: 0,
        event_index: 0,
        sequence_index: 0,
    };

    /// Terminal position for `script`.
    #[must_use]
    pub fn terminal(script: &Script) -> Self {
        Self {
            scene_index: script.scenes.len(),
            ..Self::START
        }
    }

    /// Computes where one advance from `self` lands.
    ///
    /// Only chat and fixed-dialogue events step through an inner sequence;
    /// every other event moves straight on to the next one.
    #[must_use]
    pub fn step(self, script: &Script) -> Step {
        let Some(scene) = script.scenes.get(self.scene_index) else {
            return Step::Exhausted(Self::terminal(script));
        };
        let inner_len = scene
            .events
            .get(self.event_index)
            .map_or(0, Event::inner_sequence_len);

        if self.sequence_index + 1 < inner_len {
            Step::InPlace(Self {
                sequence_index: self.sequence_index + 1,
                ..self
            })
        } else if self.event_index + 1 < scene.events.len() {
            Step::NextEvent(Self {
                event_index: self.event_index + 1,
                sequence_index: 0,
                ..self
            })
        } else if self.scene_index + 1 < script.scenes.len() {
            Step::NextScene(Self {
                scene_index: self.scene_index + 1,
                ..Self::START
            })
        } else {
            Step::Exhausted(Self::terminal(script))
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.scene_index, self.event_index, self.sequence_index
        )
    }
}
