//! Incremental chat renderer.
//!
//! Reveals chat messages one at a time as the Director's sequence index moves
//! forward. A backward move (or a restart at index 0) clears the log and
//! replays from the first message; there is no partial un-reveal.

use tracing::{debug, info, warn};
use vignette_core::error::PlaybackError;
use vignette_core::stage::{ChatMessage, ChatRole, StageCommand};
use vignette_script::{Event, EventBody, ItemShape, SequenceItem};

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};

/// Chat renderer. State lives exactly as long as the instance.
#[derive(Debug, Default)]
pub struct IncrementalChatRenderer {
    /// Highest sequence index already revealed in the current epoch.
    last_revealed: Option<usize>,
}

impl IncrementalChatRenderer {
    /// Creates a renderer with nothing revealed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest revealed index, if any.
    #[must_use]
    pub fn last_revealed(&self) -> Option<usize> {
        self.last_revealed
    }

    fn reset(&mut self, ctx: &mut RenderContext<'_>) {
        ctx.show(StageCommand::ClearChat);
        self.last_revealed = None;
    }
}

fn to_message(item: &SequenceItem, player_persona: &str) -> Option<ChatMessage> {
    let meta = item
        .metadata
        .as_ref()
        .and_then(|m| m.display())
        .map(str::to_owned);
    match item.shape() {
        ItemShape::Dialogue { speaker, text, .. } => {
            let sent = speaker == player_persona;
            Some(ChatMessage {
                role: if sent {
                    ChatRole::Sent
                } else {
                    ChatRole::Received
                },
                speaker: (!sent).then(|| speaker.to_owned()),
                text,
                meta,
            })
        }
        ItemShape::Action(action) => Some(ChatMessage {
            role: ChatRole::System,
            speaker: None,
            text: action.to_owned(),
            meta: None,
        }),
        ItemShape::Malformed => None,
    }
}

impl EventRenderer for IncrementalChatRenderer {
    fn render(
        &mut self,
        event: &Event,
        sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let EventBody::MobileChat {
            sequence: Some(sequence),
        } = &event.body
        else {
            return Err(PlaybackError::Data("mobile_chat has no sequence".into()));
        };

        let restarted = sequence_index == 0 && self.last_revealed.is_some();
        let moved_back = self.last_revealed.is_some_and(|last| sequence_index < last);
        if restarted || moved_back {
            debug!(sequence_index, last = ?self.last_revealed, "chat history reset");
            self.reset(ctx);
        }

        let first = self.last_revealed.map_or(0, |last| last + 1);
        let last = sequence_index.min(sequence.len().saturating_sub(1));
        for index in first..=last {
            let Some(item) = sequence.get(index) else {
                break;
            };
            match to_message(item, &ctx.config.player_persona) {
                Some(message) => ctx.show(StageCommand::AppendChat(message)),
                None => warn!(index, "skipping malformed chat item"),
            }
        }
        self.last_revealed = Some(sequence_index);

        info!(
            sequence_index,
            total = sequence.len(),
            "rendered mobile chat"
        );
        Ok(RenderOutcome::Handled)
    }

    fn cleanup(&mut self, ctx: &mut RenderContext<'_>) {
        if self.last_revealed.is_some() {
            self.reset(ctx);
        }
    }
}
