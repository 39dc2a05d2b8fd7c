//! Stand-in for event types the engine does not know.

use tracing::warn;
use vignette_core::error::PlaybackError;
use vignette_core::stage::StageCommand;
use vignette_script::Event;

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};

/// Shows the unknown tag so the author can see what was skipped.
#[derive(Debug, Default)]
pub struct PlaceholderRenderer;

impl EventRenderer for PlaceholderRenderer {
    fn render(
        &mut self,
        event: &Event,
        _sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let err = PlaybackError::UnknownEventType(event.tag().to_owned());
        warn!(%err, "showing placeholder");
        ctx.show(StageCommand::ShowPlaceholder {
            tag: event.tag().to_owned(),
        });
        Ok(RenderOutcome::Handled)
    }

    fn cleanup(&mut self, _ctx: &mut RenderContext<'_>) {}
}
