//! Combat and cinematic renderers.

pub mod controller;
pub mod machine;

use vignette_core::error::PlaybackError;
use vignette_core::signal::Signal;
use vignette_core::stage::MediaKind;
use vignette_script::{Event, EventBody};

use crate::renderer::{EventRenderer, RenderContext, RenderOutcome};
use controller::MediaPhaseController;

/// Renderer for media events. Owns one [`MediaPhaseController`] per render.
#[derive(Debug)]
pub struct MediaRenderer {
    kind: MediaKind,
    controller: Option<MediaPhaseController>,
}

impl MediaRenderer {
    /// Creates a renderer for combat or cinematic events.
    #[must_use]
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            controller: None,
        }
    }

    /// The controller for the event being played, if any.
    #[must_use]
    pub fn controller(&self) -> Option<&MediaPhaseController> {
        self.controller.as_ref()
    }
}

impl EventRenderer for MediaRenderer {
    fn render(
        &mut self,
        event: &Event,
        _sequence_index: usize,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderOutcome, PlaybackError> {
        let (EventBody::Combat(media) | EventBody::CgAnimation(media)) = &event.body else {
            return Err(PlaybackError::Data(format!(
                "media renderer cannot present {}",
                event.tag()
            )));
        };
        if let Some(mut previous) = self.controller.take() {
            previous.release(ctx);
        }
        let mut controller =
            MediaPhaseController::new(self.kind, media, event.description.as_deref());
        let outcome = controller.begin(ctx);
        self.controller = Some(controller);
        Ok(outcome)
    }

    fn cleanup(&mut self, ctx: &mut RenderContext<'_>) {
        if let Some(mut controller) = self.controller.take() {
            controller.release(ctx);
        }
    }

    fn on_signal(&mut self, signal: &Signal, ctx: &mut RenderContext<'_>) -> RenderOutcome {
        self.controller
            .as_mut()
            .map_or(RenderOutcome::Ignored, |c| c.handle(signal, ctx))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::machine::MediaState;
    use super::*;
    use vignette_core::config::PlaybackConfig;
    use vignette_core::stage::{EndReason, StageCommand};
    use vignette_script::{DialogueLine, MediaEvent, Phase};
    use vignette_test_support::{
        MediaCall, ManualScheduler, RecordingStage, ScriptedMediaPlayer, cg_event, combat_event,
    };

    struct Harness {
        stage: RecordingStage,
        scheduler: ManualScheduler,
        media: ScriptedMediaPlayer,
        config: PlaybackConfig,
        renderer: MediaRenderer,
    }

    impl Harness {
        fn new(kind: MediaKind) -> Self {
            Self::with_player(kind, ScriptedMediaPlayer::default())
        }

        fn with_player(kind: MediaKind, media: ScriptedMediaPlayer) -> Self {
            Self {
                stage: RecordingStage::default(),
                scheduler: ManualScheduler::default(),
                media,
                config: PlaybackConfig::default(),
                renderer: MediaRenderer::new(kind),
            }
        }

        fn render(&mut self, event: &Event) -> RenderOutcome {
            let mut ctx = RenderContext {
                stage: &mut self.stage,
                scheduler: &mut self.scheduler,
                media: &mut self.media,
                config: &self.config,
            };
            self.renderer.render(event, 0, &mut ctx).unwrap()
        }

        fn signal(&mut self, signal: &Signal) -> RenderOutcome {
            let mut ctx = RenderContext {
                stage: &mut self.stage,
                scheduler: &mut self.scheduler,
                media: &mut self.media,
                config: &self.config,
            };
            self.renderer.on_signal(signal, &mut ctx)
        }

        fn cleanup(&mut self) {
            let mut ctx = RenderContext {
                stage: &mut self.stage,
                scheduler: &mut self.scheduler,
                media: &mut self.media,
                config: &self.config,
            };
            self.renderer.cleanup(&mut ctx);
        }

        fn tick(&mut self, by: Duration) {
            for timer in self.scheduler.advance(by) {
                self.signal(&Signal::TimerElapsed(timer));
            }
        }

        fn state(&self) -> Option<MediaState> {
            self.renderer.controller().map(MediaPhaseController::state)
        }
    }

    fn overlays(stage: &RecordingStage) -> Vec<String> {
        stage
            .commands()
            .iter()
            .filter_map(|c| match c {
                StageCommand::ShowOverlay(o) => Some(o.line.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_render_loads_plays_and_shows_skip_control() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);

        // Act
        let outcome = harness.render(&combat_event("boss.mp4", true, false, &[]));

        // Assert
        assert_eq!(outcome, RenderOutcome::Handled);
        assert_eq!(harness.state(), Some(MediaState::Playing { phase: None }));
        let id = harness.media.last_loaded().unwrap();
        assert_eq!(harness.media.asset_of(id), Some("boss.mp4"));
        assert!(harness.media.calls().contains(&MediaCall::Play(id)));
        assert!(harness.stage.contains(&StageCommand::SetSkipVisible(true)));
    }

    #[test]
    fn test_skip_is_ignored_when_event_disallows_it() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("boss.mp4", false, false, &[]));
        let id = harness.media.last_loaded().unwrap();

        // Act
        let outcome = harness.signal(&Signal::Skip);

        // Assert
        assert_eq!(outcome, RenderOutcome::Ignored);
        assert_eq!(harness.state(), Some(MediaState::Playing { phase: None }));
        assert_eq!(harness.media.release_count(id), 0);
        assert!(harness.stage.contains(&StageCommand::SetSkipVisible(false)));
    }

    #[test]
    fn test_skip_ends_playback_and_releases_the_resource() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("boss.mp4", true, false, &[]));
        let id = harness.media.last_loaded().unwrap();

        // Act
        let outcome = harness.signal(&Signal::Skip);

        // Assert
        assert_eq!(outcome, RenderOutcome::MediaEnded);
        assert_eq!(harness.state(), Some(MediaState::Ended(EndReason::Skipped)));
        assert!(harness.media.calls().contains(&MediaCall::SeekToEnd(id)));
        assert_eq!(harness.media.release_count(id), 1);
        assert!(harness.media.active().is_empty());
        assert_eq!(
            harness.stage.last(),
            Some(&StageCommand::ShowMediaEnded {
                kind: MediaKind::Combat,
                reason: EndReason::Skipped
            })
        );
    }

    #[test]
    fn test_looping_media_restarts_instead_of_ending() {
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("idle.mp4", true, true, &[]));
        let id = harness.media.last_loaded().unwrap();

        let outcome = harness.signal(&Signal::MediaEnded(id));

        assert_eq!(outcome, RenderOutcome::Handled);
        assert_eq!(harness.state(), Some(MediaState::Playing { phase: None }));
        assert!(harness.media.calls().contains(&MediaCall::Restart(id)));
    }

    #[test]
    fn test_natural_end_then_continue_dismisses() {
        let mut harness = Harness::new(MediaKind::Cinematic);
        harness.render(&cg_event("opening.mp4"));
        let id = harness.media.last_loaded().unwrap();

        assert_eq!(harness.signal(&Signal::Continue), RenderOutcome::Ignored);
        assert_eq!(harness.signal(&Signal::MediaEnded(id)), RenderOutcome::MediaEnded);
        assert_eq!(harness.signal(&Signal::Continue), RenderOutcome::MediaDismissed);
    }

    #[test]
    fn test_timed_dialogue_rotates_on_the_configured_interval() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("boss.mp4", true, false, &["Line A", "Line B"]));

        // Act + Assert
        assert_eq!(overlays(&harness.stage), ["Line A"]);
        harness.tick(Duration::from_secs(4));
        assert_eq!(overlays(&harness.stage), ["Line A"]);
        harness.tick(Duration::from_secs(1));
        assert_eq!(overlays(&harness.stage), ["Line A", "Line B"]);
        harness.tick(Duration::from_secs(5));
        assert_eq!(harness.stage.last(), Some(&StageCommand::ClearOverlay));
        assert!(harness.scheduler.pending().is_empty());
    }

    #[test]
    fn test_signals_for_a_released_resource_are_ignored() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("boss.mp4", true, false, &[]));
        let stale = harness.media.last_loaded().unwrap();
        harness.cleanup();
        harness.render(&combat_event("boss.mp4", true, false, &[]));

        // Act
        let outcome = harness.signal(&Signal::MediaEnded(stale));

        // Assert
        assert_eq!(outcome, RenderOutcome::Ignored);
        assert_eq!(harness.state(), Some(MediaState::Playing { phase: None }));
    }

    #[test]
    fn test_cleanup_twice_releases_once_and_cancels_rotation() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        harness.render(&combat_event("boss.mp4", true, false, &["Line A", "Line B"]));
        let id = harness.media.last_loaded().unwrap();

        // Act
        harness.cleanup();
        harness.cleanup();

        // Assert
        assert_eq!(harness.media.release_count(id), 1);
        assert!(harness.scheduler.pending().is_empty());
        assert_eq!(harness.scheduler.cancelled().len(), 1);
        harness.tick(Duration::from_secs(30));
        assert_eq!(overlays(&harness.stage), ["Line A"]);
    }

    #[test]
    fn test_missing_asset_shows_fallback_and_ends() {
        let mut harness = Harness::new(MediaKind::Cinematic);
        let event = Event::new(EventBody::CgAnimation(MediaEvent::default()));

        let outcome = harness.render(&event);

        assert_eq!(outcome, RenderOutcome::MediaEnded);
        assert!(harness.media.calls().is_empty());
        assert!(harness.stage.contains(&StageCommand::ShowMediaFallback {
            kind: MediaKind::Cinematic,
            asset: None,
            message: "Missing animation asset".into(),
        }));
    }

    #[test]
    fn test_play_failure_falls_back_and_releases() {
        // Arrange
        let player = ScriptedMediaPlayer::default().failing("broken.mp4");
        let mut harness = Harness::with_player(MediaKind::Cinematic, player);

        // Act
        let outcome = harness.render(&cg_event("broken.mp4"));

        // Assert
        assert_eq!(outcome, RenderOutcome::MediaEnded);
        assert_eq!(
            harness.state(),
            Some(MediaState::Ended(EndReason::PlaybackFailed))
        );
        assert!(harness.media.active().is_empty());
        assert!(harness.stage.contains(&StageCommand::ShowMediaFallback {
            kind: MediaKind::Cinematic,
            asset: Some("broken.mp4".into()),
            message: "Media failed to load".into(),
        }));
    }

    #[test]
    fn test_phase_trigger_swaps_resource_and_shows_phase_dialogue() {
        // Arrange
        let mut harness = Harness::new(MediaKind::Combat);
        let event = Event::new(EventBody::Combat(MediaEvent {
            phases: vec![
                Phase {
                    video_file: Some("phase1.mp4".into()),
                    dialogue: Some(DialogueLine::new("Billy", "Round two!")),
                },
                Phase::default(),
            ],
            ..MediaEvent::new("boss.mp4")
        }));
        harness.render(&event);
        let main = harness.media.last_loaded().unwrap();

        // Act
        let outcome = harness.signal(&Signal::PhaseTrigger);
        let phase = harness.media.last_loaded().unwrap();
        harness.signal(&Signal::MediaStarted(phase));

        // Assert
        assert_eq!(outcome, RenderOutcome::Handled);
        assert_ne!(main, phase);
        assert_eq!(harness.media.release_count(main), 1);
        assert_eq!(harness.media.asset_of(phase), Some("phase1.mp4"));
        assert_eq!(overlays(&harness.stage), ["Round two!"]);
        assert_eq!(harness.state(), Some(MediaState::Playing { phase: Some(0) }));
        // The phase without an asset was dropped, so there is nothing further.
        assert_eq!(harness.signal(&Signal::PhaseTrigger), RenderOutcome::Ignored);
    }

    #[test]
    fn test_cinematic_caption_clears_after_one_interval() {
        let mut harness = Harness::new(MediaKind::Cinematic);
        harness.render(&cg_event("opening.mp4").with_description("New Eridu, dawn"));

        assert!(
            harness
                .stage
                .contains(&StageCommand::ShowCaption("New Eridu, dawn".into()))
        );
        harness.tick(Duration::from_secs(5));
        assert_eq!(harness.stage.last(), Some(&StageCommand::ClearCaption));
    }
}
