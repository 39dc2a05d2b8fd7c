//! Media phase controller: runs the transition table against the host.

use tracing::{debug, info, warn};
use vignette_core::error::PlaybackError;
use vignette_core::media::PlaybackId;
use vignette_core::scheduler::TimerId;
use vignette_core::signal::Signal;
use vignette_core::stage::{DialogueOverlay, EndReason, MediaKind, StageCommand};
use vignette_script::{DialogueLine, MediaEvent};

use super::machine::{Guards, MediaEffect, MediaInput, MediaState, step};
use crate::renderer::{RenderContext, RenderOutcome};

#[derive(Debug, Clone)]
struct PhaseCue {
    asset: String,
    dialogue: Option<DialogueOverlay>,
}

#[derive(Debug, Clone, Copy)]
struct Rotation {
    index: usize,
    timer: TimerId,
}

fn to_overlay(line: &DialogueLine) -> Option<DialogueOverlay> {
    line.is_presentable().then(|| DialogueOverlay {
        speaker: line.character.clone(),
        line: line.line.clone().unwrap_or_default(),
        action: line.action_description.clone(),
    })
}

/// Owns the playback of one combat or cinematic event.
///
/// At most one media resource is held at a time. Every load is preceded by a
/// release of the previous resource, and host signals naming any other
/// [`PlaybackId`] are dropped.
#[derive(Debug)]
pub struct MediaPhaseController {
    kind: MediaKind,
    asset: Option<String>,
    looping: bool,
    skip_allowed: bool,
    phases: Vec<PhaseCue>,
    timed_dialogue: Vec<DialogueOverlay>,
    caption: Option<String>,
    state: MediaState,
    playback: Option<PlaybackId>,
    current_asset: Option<String>,
    rotation: Option<Rotation>,
    overlay_visible: bool,
    caption_timer: Option<TimerId>,
}

impl MediaPhaseController {
    /// Builds a controller in `Idle` for the given event content.
    ///
    /// Phases without an asset and timed lines without text are dropped.
    #[must_use]
    pub fn new(kind: MediaKind, media: &MediaEvent, description: Option<&str>) -> Self {
        let phases = media
            .phases
            .iter()
            .enumerate()
            .filter_map(|(index, phase)| match &phase.video_file {
                Some(asset) => Some(PhaseCue {
                    asset: asset.clone(),
                    dialogue: phase.dialogue.as_ref().and_then(to_overlay),
                }),
                None => {
                    warn!(index, "dropping media phase without an asset");
                    None
                }
            })
            .collect();
        Self {
            kind,
            asset: media.video_file.clone().filter(|a| !a.is_empty()),
            looping: media.looping,
            skip_allowed: media.skip_allowed,
            phases,
            timed_dialogue: media
                .dialogue_during
                .iter()
                .filter_map(|d| to_overlay(&d.dialogue))
                .collect(),
            caption: match kind {
                MediaKind::Cinematic => description.map(str::to_owned),
                MediaKind::Combat => None,
            },
            state: MediaState::Idle,
            playback: None,
            current_asset: None,
            rotation: None,
            overlay_visible: false,
            caption_timer: None,
        }
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> MediaState {
        self.state
    }

    /// Handle of the resource currently held, if any.
    #[must_use]
    pub fn playback(&self) -> Option<PlaybackId> {
        self.playback
    }

    fn guards(&self) -> Guards {
        Guards {
            has_asset: self.asset.is_some(),
            looping: self.looping,
            skip_allowed: self.skip_allowed,
            phase_count: self.phases.len(),
        }
    }

    /// Enters playback from `Idle`.
    pub fn begin(&mut self, ctx: &mut RenderContext<'_>) -> RenderOutcome {
        info!(kind = ?self.kind, asset = ?self.asset, "starting media event");
        let outcome = self.feed(MediaInput::Begin, ctx);
        if let (MediaState::Playing { .. }, Some(caption)) = (self.state, self.caption.clone()) {
            ctx.show(StageCommand::ShowCaption(caption));
            self.caption_timer = Some(ctx.scheduler.schedule(ctx.config.dialogue_interval));
        }
        outcome
    }

    /// Routes a host signal into the state machine.
    pub fn handle(&mut self, signal: &Signal, ctx: &mut RenderContext<'_>) -> RenderOutcome {
        match signal {
            Signal::Continue => self.feed(MediaInput::Continue, ctx),
            Signal::Skip => {
                if !self.skip_allowed {
                    debug!("skip ignored: event does not allow skipping");
                }
                self.feed(MediaInput::Skip, ctx)
            }
            Signal::PhaseTrigger => self.feed(MediaInput::PhaseTrigger, ctx),
            Signal::MediaStarted(id) if self.playback == Some(*id) => {
                self.feed(MediaInput::Started, ctx)
            }
            Signal::MediaEnded(id) if self.playback == Some(*id) => {
                self.feed(MediaInput::ReachedEnd, ctx)
            }
            Signal::MediaFailed(id, reason) if self.playback == Some(*id) => {
                warn!(playback = %id, %reason, "media playback failed");
                self.feed(MediaInput::StartFailed, ctx)
            }
            Signal::MediaStarted(id) | Signal::MediaEnded(id) | Signal::MediaFailed(id, _) => {
                debug!(playback = %id, signal = signal.name(), "dropping signal for released media");
                RenderOutcome::Ignored
            }
            Signal::TimerElapsed(id) => self.on_timer(*id, ctx),
        }
    }

    /// Releases the resource and cancels every timer. Safe to call repeatedly.
    pub fn release(&mut self, ctx: &mut RenderContext<'_>) {
        self.stop_rotation(ctx);
        if let Some(timer) = self.caption_timer.take() {
            ctx.scheduler.cancel(timer);
            ctx.show(StageCommand::ClearCaption);
        }
        if let Some(id) = self.playback.take() {
            debug!(playback = %id, "releasing media on teardown");
            ctx.media.pause(id);
            ctx.media.release(id);
        }
    }

    fn feed(&mut self, input: MediaInput, ctx: &mut RenderContext<'_>) -> RenderOutcome {
        let mut outcome = RenderOutcome::Ignored;
        let mut pending = Some(input);
        while let Some(input) = pending.take() {
            let Some(transition) = step(self.state, input, &self.guards()) else {
                debug!(state = ?self.state, ?input, "input has no effect");
                break;
            };
            debug!(from = ?self.state, to = ?transition.next, ?input, "media transition");
            self.state = transition.next;
            if outcome == RenderOutcome::Ignored {
                outcome = RenderOutcome::Handled;
            }
            for effect in transition.effects {
                match self.execute(effect, ctx) {
                    Ok(Some(notice)) => outcome = notice,
                    Ok(None) => {}
                    Err(err) => {
                        warn!(%err, "media resource failed to start; falling back");
                        pending = Some(MediaInput::StartFailed);
                        break;
                    }
                }
            }
        }
        outcome
    }

    fn execute(
        &mut self,
        effect: MediaEffect,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Option<RenderOutcome>, PlaybackError> {
        match effect {
            MediaEffect::LoadMain => {
                let asset = self
                    .asset
                    .clone()
                    .ok_or_else(|| PlaybackError::Resource("media event has no asset".into()))?;
                self.load(asset, ctx);
                ctx.show(StageCommand::SetSkipVisible(self.skip_allowed));
            }
            MediaEffect::LoadPhase(index) => {
                let asset = self
                    .phases
                    .get(index)
                    .map(|p| p.asset.clone())
                    .ok_or_else(|| PlaybackError::Resource(format!("no phase {index}")))?;
                info!(phase = index, %asset, "entering media phase");
                self.load(asset, ctx);
            }
            MediaEffect::Play => {
                let id = self
                    .playback
                    .ok_or_else(|| PlaybackError::Resource("nothing loaded to play".into()))?;
                ctx.media.play(id)?;
            }
            MediaEffect::Restart => {
                if let Some(id) = self.playback {
                    debug!(playback = %id, "looping media");
                    ctx.media.restart(id);
                }
            }
            MediaEffect::SeekToEnd => {
                if let Some(id) = self.playback {
                    ctx.media.seek_to_end(id);
                }
            }
            MediaEffect::Pause => {
                if let Some(id) = self.playback {
                    ctx.media.pause(id);
                }
            }
            MediaEffect::Release => {
                if let Some(id) = self.playback.take() {
                    ctx.media.release(id);
                }
            }
            MediaEffect::StartRotation => self.start_rotation(ctx),
            MediaEffect::StopRotation => self.stop_rotation(ctx),
            MediaEffect::ShowPhaseDialogue(index) => {
                if let Some(overlay) = self.phases.get(index).and_then(|p| p.dialogue.clone()) {
                    ctx.show(StageCommand::ShowOverlay(overlay));
                    self.overlay_visible = true;
                }
            }
            MediaEffect::ShowFallback(reason) => {
                let message = match reason {
                    EndReason::MissingAsset => "Missing animation asset",
                    _ => "Media failed to load",
                };
                ctx.show(StageCommand::ShowMediaFallback {
                    kind: self.kind,
                    asset: self.current_asset.clone(),
                    message: message.to_owned(),
                });
            }
            MediaEffect::ShowEnded(reason) => {
                info!(kind = ?self.kind, ?reason, "media event ended");
                ctx.show(StageCommand::SetSkipVisible(false));
                ctx.show(StageCommand::ShowMediaEnded {
                    kind: self.kind,
                    reason,
                });
            }
            MediaEffect::NotifyEnded => return Ok(Some(RenderOutcome::MediaEnded)),
            MediaEffect::NotifyDismissed => return Ok(Some(RenderOutcome::MediaDismissed)),
        }
        Ok(None)
    }

    fn load(&mut self, asset: String, ctx: &mut RenderContext<'_>) {
        if let Some(previous) = self.playback.take() {
            ctx.media.release(previous);
        }
        let id = ctx.media.load(&asset, self.looping);
        debug!(playback = %id, %asset, "media loaded");
        ctx.show(StageCommand::ShowMedia {
            kind: self.kind,
            asset: asset.clone(),
            looping: self.looping,
        });
        self.playback = Some(id);
        self.current_asset = Some(asset);
    }

    fn start_rotation(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(first) = self.timed_dialogue.first().cloned() {
            ctx.show(StageCommand::ShowOverlay(first));
            self.overlay_visible = true;
            self.rotation = Some(Rotation {
                index: 0,
                timer: ctx.scheduler.schedule(ctx.config.dialogue_interval),
            });
        }
    }

    fn stop_rotation(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(rotation) = self.rotation.take() {
            ctx.scheduler.cancel(rotation.timer);
        }
        if self.overlay_visible {
            ctx.show(StageCommand::ClearOverlay);
            self.overlay_visible = false;
        }
    }

    fn on_timer(&mut self, id: TimerId, ctx: &mut RenderContext<'_>) -> RenderOutcome {
        if self.caption_timer == Some(id) {
            self.caption_timer = None;
            ctx.show(StageCommand::ClearCaption);
            return RenderOutcome::Handled;
        }
        let Some(rotation) = self.rotation.filter(|r| r.timer == id) else {
            debug!(timer = %id, "dropping unknown timer");
            return RenderOutcome::Ignored;
        };
        let next = rotation.index + 1;
        match self.timed_dialogue.get(next).cloned() {
            Some(overlay) => {
                ctx.show(StageCommand::ShowOverlay(overlay));
                self.rotation = Some(Rotation {
                    index: next,
                    timer: ctx.scheduler.schedule(ctx.config.dialogue_interval),
                });
            }
            None => {
                self.rotation = None;
                ctx.show(StageCommand::ClearOverlay);
                self.overlay_visible = false;
            }
        }
        RenderOutcome::Handled
    }
}
