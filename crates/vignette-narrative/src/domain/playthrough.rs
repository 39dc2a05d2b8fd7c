//! The playthrough aggregate: cursor, lifecycle state and recorded events.

use tracing::debug;
use uuid::Uuid;
use vignette_core::clock::Clock;
use vignette_core::error::PlaybackError;
use vignette_core::event::EventMetadata;
use vignette_script::Script;

use super::cursor::{Cursor, Step};
use super::events::{
    Ended, EventPresented, MediaContinued, NarrativeEvent, NarrativeEventKind, RenderFailed,
    SceneEntered, SequenceAdvanced, Started,
};

/// Lifecycle of a playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaythroughState {
    /// `start` has not succeeded yet.
    NotStarted,
    /// Accepting advances.
    Running,
    /// Past the last scene. Terminal.
    Ended,
}

/// What an advance did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Nothing happened; the playthrough is not running.
    Inactive,
    /// Same event, new inner position.
    InPlace,
    /// A different event is now current.
    NewEvent {
        /// The new event opens a scene.
        scene_entered: bool,
    },
    /// The playthrough just ended.
    Ended,
}

/// One run through a script.
#[derive(Debug)]
pub struct Playthrough {
    /// Session identifier stamped on every recorded event.
    pub id: Uuid,
    cursor: Cursor,
    state: PlaythroughState,
    events_presented: u64,
    recorded: i64,
    uncommitted_events: Vec<NarrativeEvent>,
}

impl Playthrough {
    /// Creates a playthrough that has not started.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            cursor: Cursor::START,
            state: PlaythroughState::NotStarted,
            events_presented: 0,
            recorded: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlaythroughState {
        self.state
    }

    /// Events recorded and not yet taken.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[NarrativeEvent] {
        &self.uncommitted_events
    }

    /// Hands over the recorded events.
    pub fn take_uncommitted_events(&mut self) -> Vec<NarrativeEvent> {
        self.recorded += i64::try_from(self.uncommitted_events.len()).unwrap_or(i64::MAX);
        std::mem::take(&mut self.uncommitted_events)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.recorded + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: NarrativeEventKind, clock: &dyn Clock) {
        let event = NarrativeEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.id,
                sequence_number: self.next_sequence_number(),
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Validates `script` and moves to the first event.
    ///
    /// Restarting a running or ended playthrough rewinds it to the start.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::EmptyScript` or `PlaybackError::EmptyScene`
    /// if the script cannot be played. A previous run is discarded either
    /// way, so a failed start leaves the playthrough `NotStarted`.
    pub fn start(&mut self, script: &Script, clock: &dyn Clock) -> Result<(), PlaybackError> {
        self.cursor = Cursor::START;
        self.events_presented = 0;
        if let Err(err) = script.validate() {
            self.state = PlaythroughState::NotStarted;
            return Err(err);
        }
        self.state = PlaythroughState::Running;
        self.record(
            NarrativeEventKind::Started(Started {
                title: script.title.clone(),
                scene_count: script.scenes.len(),
                event_count: script.event_count(),
            }),
            clock,
        );
        Ok(())
    }

    /// Applies one advance step to the cursor.
    pub fn advance(&mut self, script: &Script, clock: &dyn Clock) -> Progress {
        if self.state != PlaythroughState::Running {
            return Progress::Inactive;
        }
        let step = self.cursor.step(script);
        debug!(from = %self.cursor, ?step, "cursor step");
        match step {
            Step::InPlace(cursor) => {
                self.cursor = cursor;
                self.record(
                    NarrativeEventKind::SequenceAdvanced(SequenceAdvanced { cursor }),
                    clock,
                );
                Progress::InPlace
            }
            Step::NextEvent(cursor) => {
                self.cursor = cursor;
                Progress::NewEvent {
                    scene_entered: false,
                }
            }
            Step::NextScene(cursor) => {
                self.cursor = cursor;
                Progress::NewEvent {
                    scene_entered: true,
                }
            }
            Step::Exhausted(cursor) => {
                self.cursor = cursor;
                self.state = PlaythroughState::Ended;
                self.record(
                    NarrativeEventKind::Ended(Ended {
                        events_presented: self.events_presented,
                    }),
                    clock,
                );
                Progress::Ended
            }
        }
    }

    /// Records entry into the scene under the cursor.
    pub fn scene_entered(&mut self, scene_id: &str, clock: &dyn Clock) {
        self.record(
            NarrativeEventKind::SceneEntered(SceneEntered {
                scene_index: self.cursor.scene_index,
                scene_id: scene_id.to_owned(),
            }),
            clock,
        );
    }

    /// Records a successful presentation of the event under the cursor.
    pub fn event_presented(&mut self, event_type: &str, clock: &dyn Clock) {
        self.events_presented += 1;
        self.record(
            NarrativeEventKind::EventPresented(EventPresented {
                cursor: self.cursor,
                event_type: event_type.to_owned(),
            }),
            clock,
        );
    }

    /// Records a contained render failure.
    pub fn render_failed(&mut self, event_type: &str, error: &PlaybackError, clock: &dyn Clock) {
        self.record(
            NarrativeEventKind::RenderFailed(RenderFailed {
                cursor: self.cursor,
                event_type: event_type.to_owned(),
                reason: error.to_string(),
            }),
            clock,
        );
    }

    /// Records that finished media was continued past.
    pub fn media_continued(&mut self, automatic: bool, clock: &dyn Clock) {
        self.record(
            NarrativeEventKind::MediaContinued(MediaContinued {
                cursor: self.cursor,
                automatic,
            }),
            clock,
        );
    }
}
