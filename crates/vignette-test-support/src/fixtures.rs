//! Script builders for tests.

use vignette_script::{
    DialogueLine, Event, EventBody, MediaEvent, Scene, Script, SequenceItem, TimedDialogue,
};

/// One scene per inner vector, scene ids `scene-0`, `scene-1`, ...
#[must_use]
pub fn script_of(scenes: Vec<Vec<Event>>) -> Script {
    Script::new(
        scenes
            .into_iter()
            .enumerate()
            .map(|(i, events)| Scene::new(format!("scene-{i}"), events))
            .collect(),
    )
}

/// A narration event.
#[must_use]
pub fn narration_event(text: &str) -> Event {
    Event::new(EventBody::Narration {
        text: Some(text.to_owned()),
    })
}

/// A chat event with one dialogue item per `(speaker, line)` pair.
#[must_use]
pub fn chat_event(items: &[(&str, &str)]) -> Event {
    Event::new(EventBody::MobileChat {
        sequence: Some(
            items
                .iter()
                .map(|(speaker, line)| SequenceItem::dialogue(*speaker, *line))
                .collect(),
        ),
    })
}

/// A combat event for `asset` with the given flags and timed dialogue lines.
#[must_use]
pub fn combat_event(asset: &str, skip_allowed: bool, looping: bool, lines: &[&str]) -> Event {
    Event::new(EventBody::Combat(MediaEvent {
        looping,
        skip_allowed,
        dialogue_during: lines
            .iter()
            .map(|line| TimedDialogue {
                dialogue: DialogueLine::new("Anby", *line),
                timing_hint: None,
            })
            .collect(),
        ..MediaEvent::new(asset)
    }))
}

/// A skippable cinematic event for `asset`.
#[must_use]
pub fn cg_event(asset: &str) -> Event {
    Event::new(EventBody::CgAnimation(MediaEvent::new(asset)))
}
