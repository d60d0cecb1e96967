//! Subcommand implementations and shared session plumbing.

use std::path::{Path, PathBuf};

use anyhow::Result;

use studytrack_core::engine::ClassificationEngine;
use studytrack_core::session::SessionSnapshot;

use crate::config::{load_config_from, resolve_session_path, StudytrackConfig};

pub mod export;
pub mod import;
pub mod init;
pub mod record;
pub mod subject;
pub mod summary;

/// Resolved config plus the session path every command works against.
pub struct CommandContext {
    pub config: StudytrackConfig,
    pub session_path: PathBuf,
}

impl CommandContext {
    pub fn resolve(session: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let session_path = resolve_session_path(session, &config);
        Ok(Self {
            config,
            session_path,
        })
    }

    /// Load the engine from the session file, or start fresh if none exists.
    pub fn load_engine(&self) -> Result<ClassificationEngine> {
        if self.session_path.exists() {
            Ok(SessionSnapshot::load_json(&self.session_path)?.into_engine())
        } else {
            Ok(ClassificationEngine::new())
        }
    }

    /// Persist the engine back to the session file.
    pub fn save_engine(&self, engine: &ClassificationEngine) -> Result<()> {
        SessionSnapshot::capture(engine).save_json(&self.session_path)
    }
}

/// Parse an optional selection flag with `FromStr`, naming the flag in the
/// error message.
pub fn parse_selection<T>(value: Option<&str>, flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("--{flag}: {e}")),
        None => Ok(None),
    }
}

/// Sanitize a table title for use in a file name.
pub fn file_name_component(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Export file name for a table title, timestamped like the session files
/// the original tool produced.
pub fn export_file_name(dir: &Path, title: &str) -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    dir.join(format!(
        "analysis-{}-{timestamp}.csv",
        file_name_component(title)
    ))
}
