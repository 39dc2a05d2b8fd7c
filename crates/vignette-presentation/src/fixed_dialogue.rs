//! Fixed-view dialogue renderer: one line at a time at the cursor's position.

use tracing::{info, warn};
use vignette_core::error::PlaybackError;
use vignette_core::stage::{DialogueOverlay, StageCommand};
use vignette_script::{Event, EventBody, ItemShape};

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};

/// Shows the sequence item at the requested index. Stateless: every render
/// replaces the previous line.
#[derive(Debug, Default)]
pub struct FixedDialogueRenderer;

impl EventRenderer for FixedDialogueRenderer {
    fn render(
        &mut self,
        event: &Event,
        sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let EventBody::DialogueFixedView {
            sequence: Some(sequence),
        } = &event.body
        else {
            return Err(PlaybackError::Data(
                "dialogue_fixed_view has no sequence".into(),
            ));
        };
        let item = sequence.get(sequence_index).ok_or_else(|| {
            PlaybackError::Data(format!(
                "sequence index {sequence_index} out of range ({} items)",
                sequence.len()
            ))
        })?;

        let overlay = match item.shape() {
            ItemShape::Dialogue {
                speaker,
                text,
                action,
            } => DialogueOverlay {
                speaker: Some(speaker.to_owned()),
                line: text,
                action: action.map(str::to_owned),
            },
            ItemShape::Action(action) => DialogueOverlay {
                speaker: None,
                line: action.to_owned(),
                action: None,
            },
            ItemShape::Malformed => {
                warn!(sequence_index, "malformed fixed dialogue item");
                return Err(PlaybackError::Data(format!(
                    "sequence item {sequence_index} is neither dialogue nor action"
                )));
            }
        };

        info!(sequence_index, speaker = ?overlay.speaker, "rendering fixed dialogue");
        ctx.show(StageCommand::ShowFixedDialogue(overlay));
        Ok(RenderOutcome::Handled)
    }

    fn cleanup(&mut self, _ctx: &mut RenderContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use vignette_core::config::PlaybackConfig;
    use vignette_script::SequenceItem;
    use vignette_test_support::{ManualScheduler, RecordingStage, ScriptedMediaPlayer};

    #[test]
    fn test_renders_line_at_sequence_index() {
        // Arrange
        let mut item = SequenceItem::dialogue("Billy", "Boss, look!");
        item.action_description = Some("points at the screen".into());
        let event = Event::new(EventBody::DialogueFixedView {
            sequence: Some(vec![SequenceItem::dialogue("Nicole", "Ugh."), item]),
        });
        let mut stage = RecordingStage::default();
        let mut scheduler = ManualScheduler::default();
        let mut media = ScriptedMediaPlayer::default();
        let config = PlaybackConfig::default();
        let mut ctx = RenderContext {
            stage: &mut stage,
            scheduler: &mut scheduler,
            media: &mut media,
            config: &config,
        };

        // Act
        FixedDialogueRenderer.render(&event, 1, &mut ctx).unwrap();

        // Assert
        assert_eq!(
            stage.commands(),
            &[StageCommand::ShowFixedDialogue(DialogueOverlay {
                speaker: Some("Billy".into()),
                line: "Boss, look!".into(),
                action: Some("points at the screen".into()),
            })]
        );
    }

    #[test]
    fn test_out_of_range_index_is_a_data_error() {
        let event = Event::new(EventBody::DialogueFixedView {
            sequence: Some(vec![SequenceItem::dialogue("Nicole", "Ugh.")]),
        });
        let mut stage = RecordingStage::default();
        let mut scheduler = ManualScheduler::default();
        let mut media = ScriptedMediaPlayer::default();
        let config = PlaybackConfig::default();
        let mut ctx = RenderContext {
            stage: &mut stage,
            scheduler: &mut scheduler,
            media: &mut media,
            config: &config,
        };

        let result = FixedDialogueRenderer.render(&event, 3, &mut ctx);

        assert!(matches!(result, Err(PlaybackError::Data(_))));
    }
}
