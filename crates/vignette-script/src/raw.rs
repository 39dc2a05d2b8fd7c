//! Wire shapes for events, converted into [`Event`] after deserialization.

use serde::Deserialize;
use tracing::warn;

use crate::model::{
    Event, EventBody, MediaEvent, OverlayItem, Phase, SequenceItem, TimedDialogue,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    sequence: Option<Vec<SequenceItem>>,
    #[serde(default)]
    content_overlay: Option<Vec<OverlayItem>>,
    #[serde(default)]
    video_playback: Option<RawPlayback>,
    #[serde(default)]
    dialogue_during: Option<Vec<TimedDialogue>>,
    #[serde(default)]
    asset_ref: Option<String>,
    #[serde(default)]
    skip_allowed: Option<bool>,
    #[serde(default)]
    encounter_ref: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPlayback {
    #[serde(default)]
    video_file: Option<String>,
    #[serde(default, rename = "loop")]
    looping: bool,
    #[serde(default)]
    skip_allowed: Option<bool>,
    #[serde(default)]
    phase_videos: Vec<Phase>,
}

impl RawEvent {
    fn into_media(self) -> MediaEvent {
        let playback = self.video_playback.unwrap_or_default();
        MediaEvent {
            video_file: playback.video_file.or(self.asset_ref),
            looping: playback.looping,
            skip_allowed: playback.skip_allowed.or(self.skip_allowed).unwrap_or(true),
            phases: playback.phase_videos,
            dialogue_during: self.dialogue_during.unwrap_or_default(),
            encounter_ref: self.encounter_ref,
        }
    }
}

/// Converts a flat comic `sequence` into overlays on panel 1.
fn legacy_comic_overlays(sequence: Vec<SequenceItem>) -> Vec<OverlayItem> {
    sequence
        .into_iter()
        .map(|item| OverlayItem {
            panel: 1,
            text: if item.character.is_none() {
                item.text().or_else(|| item.action.clone())
            } else {
                None
            },
            line: item.text(),
            character: item.character,
            action_description: item.action_description,
        })
        .collect()
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let description = raw.description.clone();
        let background = raw.background.clone();
        let body = match raw.kind.as_str() {
            "narration" => EventBody::Narration { text: raw.text },
            "mobile_chat" => EventBody::MobileChat {
                sequence: raw.sequence,
            },
            "dialogue_fixed_view" => EventBody::DialogueFixedView {
                sequence: raw.sequence,
            },
            "comic_panel" => {
                let overlays = match (raw.content_overlay, raw.sequence) {
                    (Some(overlays), _) => overlays,
                    (None, Some(sequence)) => {
                        warn!(
                            items = sequence.len(),
                            "comic_panel uses a flat sequence; grouping all items under panel 1"
                        );
                        legacy_comic_overlays(sequence)
                    }
                    (None, None) => Vec::new(),
                };
                EventBody::ComicPanel { overlays }
            }
            "combat" => EventBody::Combat(raw.into_media()),
            "cg_animation" => EventBody::CgAnimation(raw.into_media()),
            other => {
                warn!(event_type = other, "unrecognized event type; will show a placeholder");
                EventBody::Unknown {
                    tag: other.to_owned(),
                }
            }
        };
        Self {
            description,
            background,
            body,
        }
    }
}
