//! Session snapshot persistence.
//!
//! A snapshot is the serializable state of one engine instance. The CLI saves
//! one after every mutating command and loads it on the next invocation, so a
//! learner's session survives between runs without the engine itself knowing
//! about files.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::ClassificationEngine;
use crate::model::Subject;

/// Serializable state of a [`ClassificationEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The selected subject at save time.
    pub current_subject: Option<String>,
    /// All subjects with their result sets, in creation order.
    pub subjects: Vec<Subject>,
}

impl SessionSnapshot {
    /// Snapshot the engine's current state.
    pub fn capture(engine: &ClassificationEngine) -> Self {
        Self {
            saved_at: Utc::now(),
            current_subject: engine.current_subject().map(str::to_string),
            subjects: engine.subjects().to_vec(),
        }
    }

    /// Rebuild an engine from this snapshot.
    pub fn into_engine(self) -> ClassificationEngine {
        ClassificationEngine::from_parts(self.current_subject, self.subjects)
    }

    /// Save the snapshot as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        let snapshot: SessionSnapshot =
            serde_json::from_str(&content).context("failed to parse session JSON")?;
        Ok(snapshot)
    }
}
