//! Test media player — records calls, fails on demand.

use std::collections::HashSet;

use vignette_core::error::PlaybackError;
use vignette_core::media::{MediaPlayer, PlaybackId};

/// One call made against [`ScriptedMediaPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    /// `load(asset, looping)` returned `id`.
    Load {
        /// Returned handle.
        id: PlaybackId,
        /// Requested asset.
        asset: String,
        /// Requested loop flag.
        looping: bool,
    },
    /// `play(id)`.
    Play(PlaybackId),
    /// `pause(id)`.
    Pause(PlaybackId),
    /// `seek_to_end(id)`.
    SeekToEnd(PlaybackId),
    /// `restart(id)`.
    Restart(PlaybackId),
    /// `release(id)`.
    Release(PlaybackId),
}

/// A media player that never plays anything but records what it was asked
/// to do. Assets registered with [`ScriptedMediaPlayer::failing`] fail to
/// start.
#[derive(Debug, Default)]
pub struct ScriptedMediaPlayer {
    next_id: u64,
    failing_assets: HashSet<String>,
    assets: Vec<(PlaybackId, String)>,
    calls: Vec<MediaCall>,
}

impl ScriptedMediaPlayer {
    /// Makes `play` fail for `asset`.
    #[must_use]
    pub fn failing(mut self, asset: impl Into<String>) -> Self {
        self.failing_assets.insert(asset.into());
        self
    }

    /// Every call, in order.
    #[must_use]
    pub fn calls(&self) -> &[MediaCall] {
        &self.calls
    }

    /// Handle returned by the most recent `load`.
    #[must_use]
    pub fn last_loaded(&self) -> Option<PlaybackId> {
        self.assets.last().map(|(id, _)| *id)
    }

    /// Asset behind a handle.
    #[must_use]
    pub fn asset_of(&self, id: PlaybackId) -> Option<&str> {
        self.assets
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, asset)| asset.as_str())
    }

    /// Number of `release` calls for `id`.
    #[must_use]
    pub fn release_count(&self, id: PlaybackId) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == MediaCall::Release(id))
            .count()
    }

    /// Handles loaded and not yet released.
    #[must_use]
    pub fn active(&self) -> Vec<PlaybackId> {
        self.assets
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| self.release_count(*id) == 0)
            .collect()
    }
}

impl MediaPlayer for ScriptedMediaPlayer {
    fn load(&mut self, asset: &str, looping: bool) -> PlaybackId {
        self.next_id += 1;
        let id = PlaybackId(self.next_id);
        self.assets.push((id, asset.to_owned()));
        self.calls.push(MediaCall::Load {
            id,
            asset: asset.to_owned(),
            looping,
        });
        id
    }

    fn play(&mut self, id: PlaybackId) -> Result<(), PlaybackError> {
        self.calls.push(MediaCall::Play(id));
        match self.asset_of(id) {
            Some(asset) if self.failing_assets.contains(asset) => Err(PlaybackError::Resource(
                format!("cannot decode {asset}"),
            )),
            _ => Ok(()),
        }
    }

    fn pause(&mut self, id: PlaybackId) {
        self.calls.push(MediaCall::Pause(id));
    }

    fn seek_to_end(&mut self, id: PlaybackId) {
        self.calls.push(MediaCall::SeekToEnd(id));
    }

    fn restart(&mut self, id: PlaybackId) {
        self.calls.push(MediaCall::Restart(id));
    }

    fn release(&mut self, id: PlaybackId) {
        self.calls.push(MediaCall::Release(id));
    }
}
