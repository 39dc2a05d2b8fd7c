//! Environment configuration for the terminal host.

use std::path::PathBuf;
use std::time::Duration;

use vignette_core::config::PlaybackConfig;

use crate::error::AppError;

/// Default simulated playback length of a media asset.
pub const DEFAULT_MEDIA_DURATION: Duration = Duration::from_millis(8000);

/// Everything the host needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Script file to play.
    pub script_path: PathBuf,
    /// Engine tunables.
    pub playback: PlaybackConfig,
    /// When set, media assets missing under this directory fail to start.
    pub media_root: Option<PathBuf>,
    /// Simulated playback length of every media asset.
    pub media_duration: Duration,
}

fn positive_millis(name: &str, raw: &str) -> Result<Duration, AppError> {
    let millis: u64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{name} must be a number of milliseconds: {e}")))?;
    if millis == 0 {
        return Err(AppError::Config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_millis(millis))
}

fn flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{name} must be a boolean, got {other:?}"
        ))),
    }
}

impl CliConfig {
    /// Reads configuration from the process environment. `script_arg` (the
    /// first command-line argument) takes precedence over `VIGNETTE_SCRIPT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if no script is named or a value is invalid.
    pub fn from_env(script_arg: Option<String>) -> Result<Self, AppError> {
        Self::from_lookup(script_arg, |name| std::env::var(name).ok())
    }

    /// Like [`CliConfig::from_env`] with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if no script is named or a value is invalid.
    pub fn from_lookup(
        script_arg: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let script_path = script_arg
            .or_else(|| lookup("VIGNETTE_SCRIPT"))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config(
                    "pass a script path or set the VIGNETTE_SCRIPT environment variable".into(),
                )
            })?;

        let mut playback = PlaybackConfig::default();
        if let Some(persona) = lookup("VIGNETTE_PLAYER_PERSONA").filter(|p| !p.is_empty()) {
            playback = playback.with_player_persona(persona);
        }
        if let Some(raw) = lookup("VIGNETTE_DIALOGUE_INTERVAL_MS") {
            playback =
                playback.with_dialogue_interval(positive_millis("VIGNETTE_DIALOGUE_INTERVAL_MS", &raw)?);
        }
        if let Some(raw) = lookup("VIGNETTE_AUTO_ADVANCE") {
            playback = playback.with_auto_advance(flag("VIGNETTE_AUTO_ADVANCE", &raw)?);
        }

        let media_duration = match lookup("VIGNETTE_MEDIA_DURATION_MS") {
            Some(raw) => positive_millis("VIGNETTE_MEDIA_DURATION_MS", &raw)?,
            None => DEFAULT_MEDIA_DURATION,
        };

        Ok(Self {
            script_path,
            playback,
            media_root: lookup("VIGNETTE_MEDIA_ROOT")
                .filter(|r| !r.is_empty())
                .map(PathBuf::from),
            media_duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_script_is_set() {
        // Arrange
        let env = lookup(&[("VIGNETTE_SCRIPT", "story.json")]);

        // Act
        let config = CliConfig::from_lookup(None, env).unwrap();

        // Assert
        assert_eq!(config.script_path, PathBuf::from("story.json"));
        assert_eq!(config.playback, PlaybackConfig::default());
        assert_eq!(config.media_root, None);
        assert_eq!(config.media_duration, DEFAULT_MEDIA_DURATION);
    }

    #[test]
    fn test_argument_overrides_environment_script() {
        let env = lookup(&[("VIGNETTE_SCRIPT", "env.json")]);

        let config = CliConfig::from_lookup(Some("arg.yaml".into()), env).unwrap();

        assert_eq!(config.script_path, PathBuf::from("arg.yaml"));
    }

    #[test]
    fn test_missing_script_is_a_config_error() {
        let result = CliConfig::from_lookup(None, lookup(&[]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_all_overrides_are_read() {
        // Arrange
        let env = lookup(&[
            ("VIGNETTE_SCRIPT", "story.yaml"),
            ("VIGNETTE_PLAYER_PERSONA", "Wise"),
            ("VIGNETTE_DIALOGUE_INTERVAL_MS", "1500"),
            ("VIGNETTE_AUTO_ADVANCE", "yes"),
            ("VIGNETTE_MEDIA_ROOT", "assets"),
            ("VIGNETTE_MEDIA_DURATION_MS", "250"),
        ]);

        // Act
        let config = CliConfig::from_lookup(None, env).unwrap();

        // Assert
        assert_eq!(config.playback.player_persona, "Wise");
        assert_eq!(config.playback.dialogue_interval, Duration::from_millis(1500));
        assert!(config.playback.auto_advance_on_media_end);
        assert_eq!(config.media_root, Some(PathBuf::from("assets")));
        assert_eq!(config.media_duration, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (name, value) in [
            ("VIGNETTE_DIALOGUE_INTERVAL_MS", "soon"),
            ("VIGNETTE_DIALOGUE_INTERVAL_MS", "0"),
            ("VIGNETTE_AUTO_ADVANCE", "maybe"),
            ("VIGNETTE_MEDIA_DURATION_MS", "-5"),
        ] {
            let env = lookup(&[("VIGNETTE_SCRIPT", "story.json"), (name, value)]);
            let result = CliConfig::from_lookup(None, env);
            assert!(matches!(result, Err(AppError::Config(_))), "{name}={value}");
        }
    }
}
