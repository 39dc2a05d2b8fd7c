//! Script ingestion from JSON or YAML sources.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};
use vignette_core::error::PlaybackError;

use crate::model::Script;

/// Serialization format of a script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl ScriptFormat {
    /// Chooses the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Load` for missing or unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self, PlaybackError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(PlaybackError::Load(format!(
                "unsupported script extension: {}",
                path.display()
            ))),
        }
    }
}

/// A parsed script together with the digest of its source.
#[derive(Debug, Clone)]
pub struct LoadedScript {
    /// The parsed script.
    pub script: Script,
    /// SHA-256 hex digest of the source text.
    pub digest: String,
}

/// Computes the SHA-256 hex digest of a script source.
#[must_use]
pub fn script_digest(source: &str) -> String {
    hex::encode(Sha256::digest(source.as_bytes()))
}

/// Parses a script from source text.
///
/// Structural validation (non-empty scenes) happens when playback starts,
/// not here.
///
/// # Errors
///
/// Returns `PlaybackError::Load` if the source is not a valid script document.
pub fn parse_script(source: &str, format: ScriptFormat) -> Result<Script, PlaybackError> {
    let script: Script = match format {
        ScriptFormat::Json => serde_json::from_str(source)
            .map_err(|e| PlaybackError::Load(format!("invalid JSON script: {e}")))?,
        ScriptFormat::Yaml => serde_yaml::from_str(source)
            .map_err(|e| PlaybackError::Load(format!("invalid YAML script: {e}")))?,
    };
    debug!(
        scenes = script.scenes.len(),
        events = script.event_count(),
        "script parsed"
    );
    Ok(script)
}

/// Reads and parses a script file.
///
/// # Errors
///
/// Returns `PlaybackError::Load` if the file cannot be read, has an
/// unsupported extension, or does not parse.
pub fn load_script(path: &Path) -> Result<LoadedScript, PlaybackError> {
    let format = ScriptFormat::from_path(path)?;
    let source = std::fs::read_to_string(path)
        .map_err(|e| PlaybackError::Load(format!("cannot read {}: {e}", path.display())))?;
    let script = parse_script(&source, format)?;
    let digest = script_digest(&source);
    info!(path = %path.display(), %digest, "script loaded");
    Ok(LoadedScript { script, digest })
}
