//! Vignette CLI — startup and runtime error types.

use thiserror::Error;
use vignette_core::error::PlaybackError;

/// Errors that stop the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The script could not be loaded or started.
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Reading input or writing output failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_error_converts_and_keeps_message() {
        let err: AppError = PlaybackError::EmptyScript.into();

        assert!(matches!(err, AppError::Playback(PlaybackError::EmptyScript)));
        assert!(err.to_string().starts_with("playback error: "));
    }

    #[test]
    fn test_config_error_message_names_the_problem() {
        let err = AppError::Config("VIGNETTE_SCRIPT must be set".into());

        assert_eq!(
            err.to_string(),
            "configuration error: VIGNETTE_SCRIPT must be set"
        );
    }
}
