//! Simulated media player for terminal playback.
//!
//! Nothing is decoded. A started asset "plays" for a fixed duration and then
//! reports its natural end. With a media root configured, assets that do not
//! exist on disk fail to start.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};
use vignette_core::error::PlaybackError;
use vignette_core::media::{MediaPlayer, PlaybackId};
use vignette_core::signal::Signal;

#[derive(Debug)]
struct Playback {
    asset: String,
    started_pending: bool,
    ends_at: Option<Instant>,
}

/// Media player whose signals are collected by the host loop.
#[derive(Debug)]
pub struct SimulatedMediaPlayer {
    media_root: Option<PathBuf>,
    duration: Duration,
    next_id: u64,
    loaded: BTreeMap<PlaybackId, Playback>,
}

impl SimulatedMediaPlayer {
    /// Creates a player. `duration` is how long every asset plays.
    #[must_use]
    pub fn new(media_root: Option<PathBuf>, duration: Duration) -> Self {
        Self {
            media_root,
            duration,
            next_id: 0,
            loaded: BTreeMap::new(),
        }
    }

    /// Earliest instant at which a signal is waiting.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let now = Instant::now();
        self.loaded
            .values()
            .filter_map(|p| if p.started_pending { Some(now) } else { p.ends_at })
            .min()
    }

    /// Collects start and natural-end signals due at `now`.
    pub fn take_signals(&mut self, now: Instant) -> Vec<Signal> {
        let mut signals = Vec::new();
        for (id, playback) in &mut self.loaded {
            if playback.started_pending {
                playback.started_pending = false;
                signals.push(Signal::MediaStarted(*id));
            }
            if playback.ends_at.is_some_and(|at| at <= now) {
                playback.ends_at = None;
                debug!(playback = %id, asset = %playback.asset, "media reached its end");
                signals.push(Signal::MediaEnded(*id));
            }
        }
        signals
    }

    /// Number of loaded, unreleased resources.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }
}

impl MediaPlayer for SimulatedMediaPlayer {
    fn load(&mut self, asset: &str, looping: bool) -> PlaybackId {
        self.next_id += 1;
        let id = PlaybackId(self.next_id);
        debug!(playback = %id, %asset, looping, "media loaded");
        self.loaded.insert(
            id,
            Playback {
                asset: asset.to_owned(),
                started_pending: false,
                ends_at: None,
            },
        );
        id
    }

    fn play(&mut self, id: PlaybackId) -> Result<(), PlaybackError> {
        let duration = self.duration;
        let root = self.media_root.clone();
        let playback = self
            .loaded
            .get_mut(&id)
            .ok_or_else(|| PlaybackError::Resource(format!("{id} is not loaded")))?;
        if let Some(root) = root {
            let path = root.join(&playback.asset);
            if !path.exists() {
                return Err(PlaybackError::Resource(format!(
                    "{} not found",
                    path.display()
                )));
            }
        }
        info!(playback = %id, asset = %playback.asset, "media playing");
        playback.started_pending = true;
        playback.ends_at = Some(Instant::now() + duration);
        Ok(())
    }

    fn pause(&mut self, id: PlaybackId) {
        if let Some(playback) = self.loaded.get_mut(&id) {
            playback.ends_at = None;
        }
    }

    fn seek_to_end(&mut self, id: PlaybackId) {
        if let Some(playback) = self.loaded.get_mut(&id) {
            playback.ends_at = Some(Instant::now());
        }
    }

    fn restart(&mut self, id: PlaybackId) {
        let duration = self.duration;
        if let Some(playback) = self.loaded.get_mut(&id) {
            playback.ends_at = Some(Instant::now() + duration);
        }
    }

    fn release(&mut self, id: PlaybackId) {
        if self.loaded.remove(&id).is_some() {
            debug!(playback = %id, "media released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_reports_start_then_end_after_duration() {
        // Arrange
        let mut player = SimulatedMediaPlayer::new(None, Duration::from_millis(100));
        let id = player.load("boss.mp4", false);
        player.play(id).unwrap();

        // Act
        let immediate = player.take_signals(Instant::now());
        let later = player.take_signals(Instant::now() + Duration::from_millis(200));

        // Assert
        assert_eq!(immediate, vec![Signal::MediaStarted(id)]);
        assert_eq!(later, vec![Signal::MediaEnded(id)]);
        assert!(player.take_signals(Instant::now() + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_missing_asset_under_media_root_fails_to_start() {
        let root = std::env::temp_dir().join("vignette-missing-media-root");
        let mut player = SimulatedMediaPlayer::new(Some(root), Duration::from_millis(100));
        let id = player.load("nope.mp4", false);

        let result = player.play(id);

        assert!(matches!(result, Err(PlaybackError::Resource(_))));
    }

    #[test]
    fn test_released_playback_emits_nothing() {
        let mut player = SimulatedMediaPlayer::new(None, Duration::from_millis(1));
        let id = player.load("a.mp4", false);
        player.play(id).unwrap();

        player.release(id);
        player.release(id);

        assert!(player.take_signals(Instant::now() + Duration::from_secs(1)).is_empty());
        assert_eq!(player.loaded(), 0);
    }
}
