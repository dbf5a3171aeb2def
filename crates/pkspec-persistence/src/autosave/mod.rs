//! Auto-save of the wizard draft.
//!
//! Provides:
//! - `AutoSaveConfig` - Quiet period, forced flush and draft file name
//! - `DraftAutoSaver` - Writes the draft once the store's revision settles
//! - `save_draft` / `load_draft` - The draft file itself

mod config;
mod draft;

pub use config::AutoSaveConfig;
pub use draft::{DRAFT_FILE_NAME, DraftAutoSaver, DraftSaveOutcome, load_draft, save_draft};
