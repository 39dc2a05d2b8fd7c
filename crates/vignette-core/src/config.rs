//! Playback configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default speaker whose chat messages render as "sent".
pub const DEFAULT_PLAYER_PERSONA: &str = "铃";

/// Default fixed interval for timed dialogue rotation and media captions.
pub const DEFAULT_DIALOGUE_INTERVAL: Duration = Duration::from_secs(5);

/// Tunables shared by the Director and the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Chat messages from this speaker are classified as sent.
    pub player_persona: String,
    /// How long each timed dialogue line stays on screen.
    pub dialogue_interval: Duration,
    /// Advance as soon as a media event ends instead of waiting for the user.
    pub auto_advance_on_media_end: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            player_persona: DEFAULT_PLAYER_PERSONA.to_owned(),
            dialogue_interval: DEFAULT_DIALOGUE_INTERVAL,
            auto_advance_on_media_end: false,
        }
    }
}

impl PlaybackConfig {
    /// Replaces the player persona.
    #[must_use]
    pub fn with_player_persona(mut self, persona: impl Into<String>) -> Self {
        self.player_persona = persona.into();
        self
    }

    /// Replaces the dialogue rotation interval.
    #[must_use]
    pub fn with_dialogue_interval(mut self, interval: Duration) -> Self {
        self.dialogue_interval = interval;
        self
    }

    /// Enables or disables automatic advance after media completion.
    #[must_use]
    pub fn with_auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance_on_media_end = enabled;
        self
    }
}
