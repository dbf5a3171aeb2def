//! Persistent storage for packaging specifications.
//!
//! This crate saves and loads specification documents as JSON, keeps the
//! wizard's draft between sessions, and maps documents onto hosted records.
//!
//! # Features
//!
//! - **Atomic writes** to prevent data corruption
//! - **Tolerant loading**: missing sections take their defaults
//! - **Draft auto-save** keyed on the wizard revision, skipping unchanged content
//! - **Content fingerprints** via SHA-256
//! - **Record repository** seam with an in-memory implementation
//!
//! # Example
//!
//! ```ignore
//! use pkspec_core::WizardStore;
//! use pkspec_persistence::{default_file_name, load_specification, save_specification};
//!
//! let mut store = WizardStore::new();
//! let specification = store.full_data(chrono::Utc::now());
//! let path = Path::new(&default_file_name(chrono::Local::now().date_naive()));
//! save_specification(&specification, path)?;
//! store.load_data(load_specification(path)?);
//! ```
//!
//! # Architecture
//!
//! - `io/` - File I/O operations (save, load, hash)
//! - `autosave/` - Draft auto-save (settings, revision-driven saver, draft files)
//! - `remote/` - Hosted records and the repository trait
//! - `error.rs` - Error types with user-facing messages

mod autosave;
mod error;
mod io;
mod remote;

pub use autosave::{
    AutoSaveConfig, DRAFT_FILE_NAME, DraftAutoSaver, DraftSaveOutcome, load_draft, save_draft,
};
pub use error::{PersistenceError, Result};
pub use io::{
    compute_file_hash, content_fingerprint, default_file_name, load_specification,
    load_specification_async, parse_specification, save_specification, save_specification_async,
    specification_fingerprint, to_json_string,
};
pub use remote::{
    DEFAULT_TITLE, InMemoryRepository, SpecificationRecord, SpecificationRepository,
    SpecificationUpdate,
};
