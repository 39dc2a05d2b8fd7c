//! Narrative Director.
//!
//! Drives a [`Playthrough`] through a script: moves the cursor, tears down the
//! previous renderer before dispatching the next, contains per-event data
//! errors, and routes host signals to whichever renderer owns the view.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;
use vignette_core::clock::{Clock, SystemClock};
use vignette_core::config::PlaybackConfig;
use vignette_core::error::PlaybackError;
use vignette_core::media::MediaPlayer;
use vignette_core::scheduler::Scheduler;
use vignette_core::signal::Signal;
use vignette_core::stage::{Stage, StageCommand};
use vignette_presentation::renderer::{EventRenderer, RenderContext, RenderOutcome, renderer_for};
use vignette_script::{Event, Script};

use crate::domain::cursor::Cursor;
use crate::domain::events::NarrativeEvent;
use crate::domain::playthrough::{Playthrough, PlaythroughState, Progress};

/// Top-level orchestrator over a host's stage, scheduler and media player.
pub struct Director<S, T, M> {
    stage: S,
    scheduler: T,
    media: M,
    config: PlaybackConfig,
    clock: Arc<dyn Clock>,
    script: Option<Script>,
    playthrough: Playthrough,
    renderer: Option<Box<dyn EventRenderer>>,
}

impl<S: Stage, T: Scheduler, M: MediaPlayer> Director<S, T, M> {
    /// Creates a Director with default configuration and the system clock.
    #[must_use]
    pub fn new(stage: S, scheduler: T, media: M) -> Self {
        Self {
            stage,
            scheduler,
            media,
            config: PlaybackConfig::default(),
            clock: Arc::new(SystemClock),
            script: None,
            playthrough: Playthrough::new(Uuid::new_v4()),
            renderer: None,
        }
    }

    /// Replaces the playback configuration.
    #[must_use]
    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the clock used to timestamp output events.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Session identifier stamped on output events.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.playthrough.id
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.playthrough.cursor()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlaythroughState {
        self.playthrough.state()
    }

    /// Returns `true` once "The End" has been shown.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.playthrough.state() == PlaythroughState::Ended
    }

    /// The event under the cursor, if playing.
    #[must_use]
    pub fn current_event(&self) -> Option<&Event> {
        if self.playthrough.state() != PlaythroughState::Running {
            return None;
        }
        let cursor = self.playthrough.cursor();
        self.script
            .as_ref()?
            .event_at(cursor.scene_index, cursor.event_index)
    }

    /// Hands over the output events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<NarrativeEvent> {
        self.playthrough.take_uncommitted_events()
    }

    /// The presentation target.
    #[must_use]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// The timer facility.
    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Mutable access to the timer facility, for hosts that poll it.
    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// The media player.
    #[must_use]
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the media player, for hosts that poll it.
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Validates `script`, rewinds to the first event and presents it.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::EmptyScript` or `PlaybackError::EmptyScene`.
    /// Nothing is presented and no previous playthrough state is kept
    /// running when start fails.
    pub fn start(&mut self, script: Script) -> Result<(), PlaybackError> {
        let was_active = self.playthrough.state() != PlaythroughState::NotStarted;
        self.teardown();
        if let Err(err) = self.playthrough.start(&script, self.clock.as_ref()) {
            error!(%err, "script cannot be played");
            self.script = None;
            if was_active {
                self.stage.apply(StageCommand::HideAll);
                self.stage.apply(StageCommand::SetBackground(None));
            }
            return Err(err);
        }
        info!(
            title = ?script.title,
            scenes = script.scenes.len(),
            events = script.event_count(),
            "narrative started"
        );
        self.script = Some(script);
        self.present_current(true);
        Ok(())
    }

    /// Generic continue: one cursor step.
    pub fn advance(&mut self) {
        let Some(script) = self.script.as_ref() else {
            debug!("advance ignored: no script");
            return;
        };
        match self.playthrough.advance(script, self.clock.as_ref()) {
            Progress::Inactive => debug!("advance ignored: not running"),
            Progress::InPlace => self.rerender_current(),
            Progress::NewEvent { scene_entered } => self.present_current(scene_entered),
            Progress::Ended => self.finish(),
        }
    }

    /// Called when media reached `Ended` and automatic advance is enabled.
    pub fn on_media_complete(&mut self) {
        self.leave_media(true);
    }

    /// Called when the user dismisses ended media.
    pub fn on_media_continue(&mut self) {
        self.leave_media(false);
    }

    /// Routes one host signal.
    ///
    /// `Continue` goes to the generic advance path unless a media event owns
    /// the view; every other signal goes to the active renderer.
    pub fn handle(&mut self, signal: Signal) {
        if self.playthrough.state() != PlaythroughState::Running {
            debug!(signal = signal.name(), "signal ignored: not running");
            return;
        }
        let media_owns_view =
            self.renderer.is_some() && self.current_event().is_some_and(Event::is_media);
        if signal == Signal::Continue && !media_owns_view {
            self.advance();
            return;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            debug!(signal = signal.name(), "signal ignored: no active renderer");
            return;
        };
        let mut ctx = RenderContext {
            stage: &mut self.stage,
            scheduler: &mut self.scheduler,
            media: &mut self.media,
            config: &self.config,
        };
        let outcome = renderer.on_signal(&signal, &mut ctx);
        self.on_outcome(outcome);
    }

    fn leave_media(&mut self, automatic: bool) {
        if !self.current_event().is_some_and(Event::is_media) {
            debug!(automatic, "media continue ignored: current event is not media");
            return;
        }
        info!(cursor = %self.cursor(), automatic, "continuing past media");
        self.playthrough
            .media_continued(automatic, self.clock.as_ref());
        self.advance();
    }

    fn on_outcome(&mut self, outcome: RenderOutcome) {
        match outcome {
            RenderOutcome::MediaEnded if self.config.auto_advance_on_media_end => {
                self.on_media_complete();
            }
            RenderOutcome::MediaDismissed => self.on_media_continue(),
            RenderOutcome::Ignored | RenderOutcome::Handled | RenderOutcome::MediaEnded => {}
        }
    }

    fn teardown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            debug!(renderer = ?renderer, "tearing down renderer");
            let mut ctx = RenderContext {
                stage: &mut self.stage,
                scheduler: &mut self.scheduler,
                media: &mut self.media,
                config: &self.config,
            };
            renderer.cleanup(&mut ctx);
        }
    }

    fn present_current(&mut self, scene_entered: bool) {
        self.teardown();
        let cursor = self.playthrough.cursor();
        let Some(script) = self.script.as_ref() else {
            return;
        };
        let Some(scene) = script.scenes.get(cursor.scene_index) else {
            return;
        };
        let Some(event) = scene.events.get(cursor.event_index).cloned() else {
            return;
        };
        if scene_entered {
            info!(scene_id = %scene.scene_id, scene_index = cursor.scene_index, "entering scene");
            let scene_id = scene.scene_id.clone();
            self.playthrough
                .scene_entered(&scene_id, self.clock.as_ref());
        }

        self.stage.apply(StageCommand::HideAll);
        self.stage
            .apply(StageCommand::SetBackground(event.background.clone()));

        let mut renderer = renderer_for(&event);
        let mut ctx = RenderContext {
            stage: &mut self.stage,
            scheduler: &mut self.scheduler,
            media: &mut self.media,
            config: &self.config,
        };
        let result = renderer.render(&event, cursor.sequence_index, &mut ctx);
        self.renderer = Some(renderer);
        match result {
            Ok(outcome) => {
                info!(
                    event_type = event.tag(),
                    scene_index = cursor.scene_index,
                    event_index = cursor.event_index,
                    "event presented"
                );
                self.playthrough
                    .event_presented(event.tag(), self.clock.as_ref());
                self.on_outcome(outcome);
            }
            Err(err) => self.contain(&event, &err),
        }
    }

    fn rerender_current(&mut self) {
        let cursor = self.playthrough.cursor();
        let Some(event) = self.current_event().cloned() else {
            return;
        };
        debug!(sequence_index = cursor.sequence_index, "advancing inner sequence");
        let Some(renderer) = self.renderer.as_mut() else {
            debug!("no live renderer for in-place step; re-presenting");
            self.present_current(false);
            return;
        };
        let mut ctx = RenderContext {
            stage: &mut self.stage,
            scheduler: &mut self.scheduler,
            media: &mut self.media,
            config: &self.config,
        };
        let result = renderer.render(&event, cursor.sequence_index, &mut ctx);
        match result {
            Ok(outcome) => self.on_outcome(outcome),
            Err(err) => self.contain(&event, &err),
        }
    }

    fn contain(&mut self, event: &Event, err: &PlaybackError) {
        warn!(
            event_type = event.tag(),
            cursor = %self.cursor(),
            %err,
            "event could not be rendered; hiding view"
        );
        self.teardown();
        self.stage.apply(StageCommand::HideAll);
        self.playthrough
            .render_failed(event.tag(), err, self.clock.as_ref());
    }

    fn finish(&mut self) {
        self.teardown();
        self.stage.apply(StageCommand::HideAll);
        self.stage.apply(StageCommand::SetBackground(None));
        self.stage.apply(StageCommand::ShowEnd);
        info!("narrative ended");
    }
}
