//! Draft auto-save settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::DRAFT_FILE_NAME;

/// How eagerly wizard edits reach the draft file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoSaveConfig {
    pub enabled: bool,

    /// Edits closer together than this many milliseconds share one save.
    pub quiet_ms: u64,

    /// A draft left unsaved this long is written even while edits continue.
    pub flush_after_ms: u64,

    /// Draft file name inside the storage directory.
    pub file_name: String,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_ms: 1000,
            flush_after_ms: 15_000,
            file_name: DRAFT_FILE_NAME.to_string(),
        }
    }
}

impl AutoSaveConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Save on the first tick that sees a new revision.
    pub fn immediate() -> Self {
        Self {
            quiet_ms: 0,
            flush_after_ms: 0,
            ..Default::default()
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_ms)
    }

    pub fn flush_after(&self) -> Duration {
        Duration::from_millis(self.flush_after_ms)
    }

    pub fn draft_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}
