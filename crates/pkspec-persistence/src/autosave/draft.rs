//! Draft storage: the wizard's persisted state between sessions.
//!
//! Drafts are stored as `{"state": ..., "version": 0}` so the file reads
//! the same as the browser storage entry it replaces.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pkspec_core::{DraftState, WizardStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AutoSaveConfig;
use crate::error::{PersistenceError, Result};
use crate::io::{content_fingerprint, write_atomic};

pub const DRAFT_FILE_NAME: &str = "packaging-spec-storage.json";
const DRAFT_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct DraftEnvelope {
    state: DraftState,
    #[serde(default)]
    version: u32,
}

pub fn save_draft(draft: &DraftState, path: &Path) -> Result<()> {
    let envelope = DraftEnvelope {
        state: draft.clone(),
        version: DRAFT_VERSION,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })?;
    write_atomic(path, &bytes)?;
    debug!("Saved draft to {}", path.display());
    Ok(())
}

/// Read a draft. A missing file means there is no draft yet.
pub fn load_draft(path: &Path) -> Result<Option<DraftState>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PersistenceError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let envelope: DraftEnvelope =
        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::InvalidFormat {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })?;
    info!("Restored draft from {}", path.display());
    Ok(Some(envelope.state))
}

/// Result of an auto-save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSaveOutcome {
    /// Draft written to disk.
    Saved,
    /// Content matched the last saved draft; nothing written.
    Unchanged,
    /// Already saved, auto-save disabled, or edits have not settled yet.
    NotDue,
}

/// A store revision not yet written, with when it was first and last seen.
#[derive(Debug, Clone, Copy)]
struct PendingRevision {
    revision: u64,
    first_seen: Instant,
    last_seen: Instant,
}

/// Writes the wizard draft once the store's revision stops moving.
#[derive(Debug, Clone)]
pub struct DraftAutoSaver {
    path: PathBuf,
    config: AutoSaveConfig,
    saved_revision: Option<u64>,
    pending: Option<PendingRevision>,
    last_fingerprint: Option<String>,
}

impl DraftAutoSaver {
    pub fn new(path: impl Into<PathBuf>, config: AutoSaveConfig) -> Self {
        Self {
            path: path.into(),
            config,
            saved_revision: None,
            pending: None,
            last_fingerprint: None,
        }
    }

    /// Saver for the configured draft file inside `dir`.
    pub fn in_dir(dir: &Path, config: AutoSaveConfig) -> Self {
        let path = config.draft_path(dir);
        Self::new(path, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store revision the draft file currently holds.
    pub fn saved_revision(&self) -> Option<u64> {
        self.saved_revision
    }

    /// Whether `store` has edits the draft file does not hold.
    pub fn is_dirty(&self, store: &WizardStore) -> bool {
        self.saved_revision != Some(store.revision())
    }

    /// Load the draft file into `store`. Returns `false` when there is none.
    pub fn restore(&mut self, store: &mut WizardStore) -> Result<bool> {
        let Some(draft) = load_draft(&self.path)? else {
            return Ok(false);
        };
        store.restore_draft(draft);
        self.last_fingerprint = Some(content_fingerprint(store.draft())?);
        self.saved_revision = Some(store.revision());
        self.pending = None;
        Ok(true)
    }

    /// Save when the store's revision has been quiet long enough, or has
    /// stayed unsaved past the flush limit.
    pub fn tick(&mut self, store: &WizardStore, now: Instant) -> Result<DraftSaveOutcome> {
        if !self.config.enabled || !self.is_dirty(store) {
            self.pending = None;
            return Ok(DraftSaveOutcome::NotDue);
        }

        let revision = store.revision();
        let pending = match self.pending {
            Some(pending) if pending.revision == revision => pending,
            Some(pending) => PendingRevision {
                revision,
                first_seen: pending.first_seen,
                last_seen: now,
            },
            None => PendingRevision {
                revision,
                first_seen: now,
                last_seen: now,
            },
        };
        self.pending = Some(pending);

        let quiet = now.saturating_duration_since(pending.last_seen) >= self.config.quiet_period();
        let overdue =
            now.saturating_duration_since(pending.first_seen) >= self.config.flush_after();
        if !quiet && !overdue {
            return Ok(DraftSaveOutcome::NotDue);
        }
        self.save_now(store)
    }

    /// Save immediately unless the content is unchanged since the last save.
    /// A failed write leaves the store dirty.
    pub fn save_now(&mut self, store: &WizardStore) -> Result<DraftSaveOutcome> {
        let revision = store.revision();
        let fingerprint = content_fingerprint(store.draft())?;
        let outcome = if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            DraftSaveOutcome::Unchanged
        } else {
            save_draft(store.draft(), &self.path)?;
            self.last_fingerprint = Some(fingerprint);
            DraftSaveOutcome::Saved
        };
        self.saved_revision = Some(revision);
        self.pending = None;
        debug!(revision, ?outcome, "Draft auto-save");
        Ok(outcome)
    }
}
