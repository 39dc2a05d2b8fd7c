//! Shared helpers for playthrough scenario tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use vignette_core::config::PlaybackConfig;
use vignette_core::signal::Signal;
use vignette_core::stage::StageCommand;
use vignette_narrative::Director;
use vignette_test_support::{FixedClock, ManualScheduler, RecordingStage, ScriptedMediaPlayer};

pub type TestDirector = Director<RecordingStage, ManualScheduler, ScriptedMediaPlayer>;

/// Director over recording doubles with a fixed clock.
pub fn director() -> TestDirector {
    director_with(PlaybackConfig::default(), ScriptedMediaPlayer::default())
}

/// Director with explicit configuration and media player.
pub fn director_with(config: PlaybackConfig, media: ScriptedMediaPlayer) -> TestDirector {
    Director::new(RecordingStage::default(), ManualScheduler::default(), media)
        .with_config(config)
        .with_clock(Arc::new(FixedClock::default()))
}

/// Moves simulated time forward and delivers every timer that became due.
pub fn tick(director: &mut TestDirector, by: Duration) {
    let due = director.scheduler_mut().advance(by);
    for timer in due {
        director.handle(Signal::TimerElapsed(timer));
    }
}

/// Event types drained from the Director, in order.
pub fn drained_types(director: &mut TestDirector) -> Vec<&'static str> {
    director
        .drain_events()
        .iter()
        .map(|e| e.kind.event_type())
        .collect()
}

/// Number of times "The End" was shown.
pub fn end_count(director: &TestDirector) -> usize {
    director
        .stage()
        .count(|c| *c == StageCommand::ShowEnd)
}
