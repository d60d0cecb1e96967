//! CLI configuration.
//!
//! Optional `studytrack.toml` with defaults for the session file and the
//! subject to record under when none is selected yet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level studytrack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudytrackConfig {
    /// Where the session snapshot lives.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Subject to fall back to when the session has none selected.
    #[serde(default)]
    pub default_subject: Option<String>,
}

/// Load config from an explicit path, or from `studytrack.toml` in the
/// current directory when present.
pub fn load_config_from(path: Option<&Path>) -> Result<StudytrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studytrack.toml");
        local.exists().then_some(local)
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudytrackConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudytrackConfig::default(),
    };

    if let Ok(session) = std::env::var("STUDYTRACK_SESSION") {
        if !session.is_empty() {
            config.session_file = Some(PathBuf::from(session));
        }
    }

    Ok(config)
}

/// Resolve the session path: flag, then config, then the local default.
pub fn resolve_session_path(
    flag: Option<PathBuf>,
    config: &StudytrackConfig,
) -> PathBuf {
    flag.or_else(|| config.session_file.clone())
        .unwrap_or_else(|| PathBuf::from("studytrack-session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_config_fails() {
        assert!(load_config_from(Some(Path::new("no_such_config.toml"))).is_err());
    }

    #[test]
    fn session_path_precedence() {
        let config = StudytrackConfig {
            session_file: Some(PathBuf::from("from-config.json")),
            default_subject: None,
        };
        assert_eq!(
            resolve_session_path(Some(PathBuf::from("from-flag.json")), &config),
            PathBuf::from("from-flag.json")
        );
        assert_eq!(
            resolve_session_path(None, &config),
            PathBuf::from("from-config.json")
        );
        assert_eq!(
            resolve_session_path(None, &StudytrackConfig::default()),
            PathBuf::from("studytrack-session.json")
        );
    }
}
