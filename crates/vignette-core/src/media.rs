//! Media resource contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Handle for one loaded media resource.
///
/// Host signals (`MediaStarted`, `MediaEnded`, `MediaFailed`) carry the id of
/// the resource they concern, so a consumer can drop signals from resources
/// it has already released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaybackId(pub u64);

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback-{}", self.0)
    }
}

/// Host-provided video/animation player.
pub trait MediaPlayer {
    /// Prepares `asset` for playback and returns its handle.
    fn load(&mut self, asset: &str, looping: bool) -> PlaybackId;

    /// Attempts to start playback.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Resource` if the resource cannot start. Hosts
    /// that only learn about failures later deliver a `MediaFailed` signal
    /// instead.
    fn play(&mut self, id: PlaybackId) -> Result<(), PlaybackError>;

    /// Pauses playback.
    fn pause(&mut self, id: PlaybackId);

    /// Moves the position to just before the natural end.
    fn seek_to_end(&mut self, id: PlaybackId);

    /// Restarts playback from the beginning.
    fn restart(&mut self, id: PlaybackId);

    /// Releases the resource. No further signals may be delivered for `id`.
    fn release(&mut self, id: PlaybackId);
}
