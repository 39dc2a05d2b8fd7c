//! Comic panel renderer.
//!
//! Overlays are grouped by panel number and shown all at once; the Director's
//! cursor never steps through them.

use std::collections::BTreeMap;

use tracing::{info, warn};
use vignette_core::error::PlaybackError;
use vignette_core::stage::{
    BubbleContent, BubbleSide, ComicBubble, DialogueOverlay, PanelGroup, StageCommand,
};
use vignette_script::{Event, EventBody, OverlayContent, OverlayItem};

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};

const MISSING_CONTENT: &str = "[Comic Panel Content Missing]";

/// Renders grouped comic panels.
#[derive(Debug, Default)]
pub struct ComicPanelRenderer;

fn group_panels(overlays: &[OverlayItem]) -> Vec<PanelGroup> {
    let mut panels: BTreeMap<u32, Vec<ComicBubble>> = BTreeMap::new();
    for (index, overlay) in overlays.iter().enumerate() {
        let Some(content) = overlay.content() else {
            warn!(index, panel = overlay.panel, "skipping malformed comic overlay");
            continue;
        };
        let side = if index % 2 == 0 {
            BubbleSide::Left
        } else {
            BubbleSide::Right
        };
        let content = match content {
            OverlayContent::Dialogue(line) => BubbleContent::Speech(DialogueOverlay {
                speaker: line.character,
                line: line.line.unwrap_or_default(),
                action: line.action_description,
            }),
            OverlayContent::Narration(text) => BubbleContent::Narration(text),
        };
        panels
            .entry(overlay.panel)
            .or_default()
            .push(ComicBubble { side, content });
    }
    panels
        .into_iter()
        .map(|(panel, bubbles)| PanelGroup { panel, bubbles })
        .collect()
}

impl EventRenderer for ComicPanelRenderer {
    fn render(
        &mut self,
        event: &Event,
        _sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let EventBody::ComicPanel { overlays } = &event.body else {
            return Err(PlaybackError::Data(format!(
                "comic renderer cannot present {}",
                event.tag()
            )));
        };

        let panels = group_panels(overlays);
        if panels.is_empty() {
            warn!("comic panel has no usable overlays; showing fallback");
            let text = event
                .description
                .clone()
                .unwrap_or_else(|| MISSING_CONTENT.to_owned());
            ctx.show(StageCommand::ShowComicFallback { text });
        } else {
            info!(panels = panels.len(), "rendering comic panels");
            ctx.show(StageCommand::ShowComic { panels });
        }
        Ok(RenderOutcome::Handled)
    }

    fn cleanup(&mut self, _ctx: &mut RenderContext<'_>) {}
}
