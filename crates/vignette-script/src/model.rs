//! Script data shapes.
//!
//! Everything here is plain data. Required-but-missing fields stay `Option`
//! so that a malformed event surfaces as a contained data error when it is
//! rendered instead of failing the whole load.

use serde::Deserialize;
use vignette_core::error::PlaybackError;

use crate::raw::RawEvent;

/// A loaded narrative: an ordered sequence of scenes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Optional human-readable title.
    #[serde(rename = "gameTitle", alias = "title", default)]
    pub title: Option<String>,
    /// Scenes in playback order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Script {
    /// Creates a script from scenes.
    #[must_use]
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            title: None,
            scenes,
        }
    }

    /// Checks the structural invariants required for playback.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::EmptyScript` if there are no scenes and
    /// `PlaybackError::EmptyScene` for the first scene without events.
    pub fn validate(&self) -> Result<(), PlaybackError> {
        if self.scenes.is_empty() {
            return Err(PlaybackError::EmptyScript);
        }
        if let Some(scene) = self.scenes.iter().find(|s| s.events.is_empty()) {
            return Err(PlaybackError::EmptyScene {
                scene_id: scene.scene_id.clone(),
            });
        }
        Ok(())
    }

    /// Returns the event at the given scene/event position.
    #[must_use]
    pub fn event_at(&self, scene_index: usize, event_index: usize) -> Option<&Event> {
        self.scenes.get(scene_index)?.events.get(event_index)
    }

    /// Total number of events across all scenes.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.scenes.iter().map(|s| s.events.len()).sum()
    }
}

/// A scene: an identifier plus its ordered events.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    /// Author-facing scene identifier.
    #[serde(rename = "sceneId", alias = "scene_id")]
    pub scene_id: String,
    /// Events in playback order.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Scene {
    /// Creates a scene.
    #[must_use]
    pub fn new(scene_id: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            scene_id: scene_id.into(),
            events,
        }
    }
}

/// One scripted narrative unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawEvent")]
pub struct Event {
    /// Human-readable description, used as a fallback or caption.
    pub description: Option<String>,
    /// Background asset shown behind the event's view.
    pub background: Option<String>,
    /// Variant-specific content.
    pub body: EventBody,
}

impl Event {
    /// Creates an event without description or background.
    #[must_use]
    pub fn new(body: EventBody) -> Self {
        Self {
            description: None,
            background: None,
            body,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the background asset.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Returns the wire tag of this event.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.body.tag()
    }

    /// Length of the inner sequence the Director's cursor steps through.
    ///
    /// Only chat and fixed-dialogue events have one. Comic and media events
    /// reveal their inner content through their own renderer.
    #[must_use]
    pub fn inner_sequence_len(&self) -> usize {
        match &self.body {
            EventBody::MobileChat { sequence } | EventBody::DialogueFixedView { sequence } => {
                sequence.as_ref().map_or(0, Vec::len)
            }
            _ => 0,
        }
    }

    /// Returns `true` for combat and cinematic events.
    #[must_use]
    pub fn is_media(&self) -> bool {
        matches!(self.body, EventBody::Combat(_) | EventBody::CgAnimation(_))
    }
}

/// Variant-specific event content.
#[derive(Debug, Clone)]
pub enum EventBody {
    /// A block of narration text.
    Narration {
        /// The narration text.
        text: Option<String>,
    },
    /// Chat-style messages revealed one at a time.
    MobileChat {
        /// The chat messages.
        sequence: Option<Vec<SequenceItem>>,
    },
    /// Dialogue lines shown one at a time over a fixed view.
    DialogueFixedView {
        /// The dialogue lines.
        sequence: Option<Vec<SequenceItem>>,
    },
    /// Comic panels with dialogue or narration overlays.
    ComicPanel {
        /// Overlay items tagged with their panel number.
        overlays: Vec<OverlayItem>,
    },
    /// Full-motion combat sequence.
    Combat(MediaEvent),
    /// Cinematic cutscene.
    CgAnimation(MediaEvent),
    /// A tag this engine does not know; shown as a placeholder.
    Unknown {
        /// The unrecognized tag.
        tag: String,
    },
}

impl EventBody {
    /// Returns the wire tag of this body.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Narration { .. } => "narration",
            Self::MobileChat { .. } => "mobile_chat",
            Self::DialogueFixedView { .. } => "dialogue_fixed_view",
            Self::ComicPanel { .. } => "comic_panel",
            Self::Combat(_) => "combat",
            Self::CgAnimation(_) => "cg_animation",
            Self::Unknown { tag } => tag,
        }
    }
}

/// Chat message status/timestamp line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageMetadata {
    /// Display timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Delivery status such as "read".
    #[serde(default)]
    pub status: Option<String>,
}

impl MessageMetadata {
    /// The text shown under a bubble: the timestamp, else the status.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.status.as_deref())
    }
}

/// An inner, individually revealable unit of a chat or dialogue event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SequenceItem {
    /// Speaker name.
    #[serde(default)]
    pub character: Option<String>,
    /// Single line of text.
    #[serde(default)]
    pub line: Option<String>,
    /// Multiple lines of text, joined with newlines.
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    /// Stage direction accompanying a dialogue line.
    #[serde(default)]
    pub action_description: Option<String>,
    /// Action or system message with no speaker.
    #[serde(default)]
    pub action: Option<String>,
    /// Chat metadata.
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
}

/// How a [`SequenceItem`] should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemShape<'a> {
    /// A spoken line.
    Dialogue {
        /// Speaker name.
        speaker: &'a str,
        /// Line text.
        text: String,
        /// Optional stage direction.
        action: Option<&'a str>,
    },
    /// An action or system line.
    Action(&'a str),
    /// Neither dialogue nor action.
    Malformed,
}

impl SequenceItem {
    /// A dialogue item.
    #[must_use]
    pub fn dialogue(character: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            character: Some(character.into()),
            line: Some(line.into()),
            ..Self::default()
        }
    }

    /// An action/system item.
    #[must_use]
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// The line text: `line` if present, otherwise `lines` joined by newlines.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match (&self.line, &self.lines) {
            (Some(line), _) => Some(line.clone()),
            (None, Some(lines)) if !lines.is_empty() => Some(lines.join("\n")),
            _ => None,
        }
    }

    /// Classifies the item.
    #[must_use]
    pub fn shape(&self) -> ItemShape<'_> {
        if let (Some(speaker), Some(text)) = (self.character.as_deref(), self.text()) {
            return ItemShape::Dialogue {
                speaker,
                text,
                action: self.action_description.as_deref(),
            };
        }
        match self.action.as_deref() {
            Some(action) => ItemShape::Action(action),
            None => ItemShape::Malformed,
        }
    }
}

/// A speaker plus line, used by timed dialogue and phase overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DialogueLine {
    /// Speaker name.
    #[serde(default)]
    pub character: Option<String>,
    /// Line text.
    #[serde(default)]
    pub line: Option<String>,
    /// Optional stage direction.
    #[serde(default)]
    pub action_description: Option<String>,
}

impl DialogueLine {
    /// Creates a dialogue line.
    #[must_use]
    pub fn new(character: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            character: Some(character.into()),
            line: Some(line.into()),
            action_description: None,
        }
    }

    /// Returns `true` if there is text to show.
    #[must_use]
    pub fn is_presentable(&self) -> bool {
        self.line.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// What a comic overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayContent {
    /// A speech bubble.
    Dialogue(DialogueLine),
    /// A narration box.
    Narration(String),
}

/// An overlay tagged to a comic panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverlayItem {
    /// Panel number the overlay belongs to.
    #[serde(default = "first_panel")]
    pub panel: u32,
    /// Speaker name.
    #[serde(default)]
    pub character: Option<String>,
    /// Spoken line.
    #[serde(default)]
    pub line: Option<String>,
    /// Stage direction.
    #[serde(default)]
    pub action_description: Option<String>,
    /// Narration text.
    #[serde(default, alias = "narration")]
    pub text: Option<String>,
}

fn first_panel() -> u32 {
    1
}

impl OverlayItem {
    /// The overlay's content, if it is well-formed.
    #[must_use]
    pub fn content(&self) -> Option<OverlayContent> {
        match (&self.character, &self.line, &self.text) {
            (Some(character), Some(line), _) => Some(OverlayContent::Dialogue(DialogueLine {
                character: Some(character.clone()),
                line: Some(line.clone()),
                action_description: self.action_description.clone(),
            })),
            (_, _, Some(text)) => Some(OverlayContent::Narration(text.clone())),
            _ => None,
        }
    }
}

/// Playback description shared by combat and cinematic events.
#[derive(Debug, Clone, Default)]
pub struct MediaEvent {
    /// Main media asset.
    pub video_file: Option<String>,
    /// Restart from the beginning when the media reaches its end.
    pub looping: bool,
    /// Whether the user may skip.
    pub skip_allowed: bool,
    /// Additional stages entered on phase triggers.
    pub phases: Vec<Phase>,
    /// Lines rotated on a fixed interval while playing.
    pub dialogue_during: Vec<TimedDialogue>,
    /// Informational encounter label.
    pub encounter_ref: Option<String>,
}

impl MediaEvent {
    /// Media event for the given asset, skippable, not looping.
    #[must_use]
    pub fn new(video_file: impl Into<String>) -> Self {
        Self {
            video_file: Some(video_file.into()),
            skip_allowed: true,
            ..Self::default()
        }
    }
}

/// One stage of a multi-stage media event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Phase {
    /// Media asset for this phase.
    #[serde(default)]
    pub video_file: Option<String>,
    /// Overlay shown when the phase begins.
    #[serde(default)]
    pub dialogue: Option<DialogueLine>,
}

/// A line shown during media playback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimedDialogue {
    /// The line.
    #[serde(flatten)]
    pub dialogue: DialogueLine,
    /// Approximate timing hint from the script; informational only.
    #[serde(default)]
    pub timing_hint: Option<String>,
}
