//! Event renderer contract and the closed dispatch table.

use std::fmt;

use vignette_core::config::PlaybackConfig;
use vignette_core::error::PlaybackError;
use vignette_core::media::MediaPlayer;
use vignette_core::scheduler::Scheduler;
use vignette_core::signal::Signal;
use vignette_core::stage::{MediaKind, Stage, StageCommand};
use vignette_script::{Event, EventBody};

use crate::chat::IncrementalChatRenderer;
use crate::comic::ComicPanelRenderer;
use crate::fixed_dialogue::FixedDialogueRenderer;
use crate::media::MediaRenderer;
use crate::narration::NarrationRenderer;
use crate::placeholder::PlaceholderRenderer;

/// Everything a renderer may touch while presenting an event.
pub struct RenderContext<'a> {
    /// The presentation surface.
    pub stage: &'a mut dyn Stage,
    /// Timer facility.
    pub scheduler: &'a mut dyn Scheduler,
    /// Media resource facility.
    pub media: &'a mut dyn MediaPlayer,
    /// Playback tunables.
    pub config: &'a PlaybackConfig,
}

impl RenderContext<'_> {
    /// Shorthand for `self.stage.apply(command)`.
    pub fn show(&mut self, command: StageCommand) {
        self.stage.apply(command);
    }
}

/// What a renderer did with a render call or a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The signal is not meant for this renderer.
    Ignored,
    /// Consumed; nothing for the Director to do.
    Handled,
    /// Media playback has ended (naturally, skipped or failed).
    MediaEnded,
    /// The user dismissed ended media and wants to move on.
    MediaDismissed,
}

/// A per-event-type presentation handler.
///
/// The Director only ever uses this contract. `render` may be called again on
/// the same instance with a larger or smaller `sequence_index`; `cleanup`
/// must release everything the renderer created and be safe to call twice.
pub trait EventRenderer: fmt::Debug {
    /// Presents `event` at `sequence_index`.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Data` if the event lacks what this renderer
    /// needs. The caller contains the error; the renderer must leave nothing
    /// armed when it fails.
    fn render(
        &mut self,
        event: &Event,
        sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError>;

    /// Releases timers, subscriptions and resources.
    fn cleanup(&mut self, ctx: &mut RenderContext<'_>);

    /// Reacts to a host signal while this renderer is active.
    fn on_signal(&mut self, _signal: &Signal, _ctx: &mut RenderContext<'_>) -> RenderOutcome {
        RenderOutcome::Ignored
    }
}

/// Builds the renderer for `event`. Total over every event body, including
/// unknown tags.
#[must_use]
pub fn renderer_for(event: &Event) -> Box<dyn EventRenderer> {
    match &event.body {
        EventBody::Narration { .. } => Box::new(NarrationRenderer),
        EventBody::MobileChat { .. } => Box::new(IncrementalChatRenderer::new()),
        EventBody::DialogueFixedView { .. } => Box::new(FixedDialogueRenderer),
        EventBody::ComicPanel { .. } => Box::new(ComicPanelRenderer),
        EventBody::Combat(_) => Box::new(MediaRenderer::new(MediaKind::Combat)),
        EventBody::CgAnimation(_) => Box::new(MediaRenderer::new(MediaKind::Cinematic)),
        EventBody::Unknown { .. } => Box::new(PlaceholderRenderer),
    }
}
