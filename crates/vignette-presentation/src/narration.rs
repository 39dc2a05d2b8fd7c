//! Narration renderer.

use tracing::info;
use vignette_core::error::PlaybackError;
use vignette_core::stage::StageCommand;
use vignette_script::{Event, EventBody};

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};

/// Shows a block of narration text. Stateless.
#[derive(Debug, Default)]
pub struct NarrationRenderer;

impl EventRenderer for NarrationRenderer {
    fn render(
        &mut self,
        event: &Event,
        _sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let text = match &event.body {
            EventBody::Narration { text } => text.as_ref().or(event.description.as_ref()),
            _ => None,
        }
        .ok_or_else(|| PlaybackError::Data("narration has neither text nor description".into()))?;

        info!(chars = text.chars().count(), "rendering narration");
        ctx.show(StageCommand::ShowNarration { text: text.clone() });
        Ok(RenderOutcome::Handled)
    }

    fn cleanup(&mut self, _ctx: &mut RenderContext<'_>) {}
}
