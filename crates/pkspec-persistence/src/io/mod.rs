//! File I/O operations for specification persistence.
//!
//! This module handles:
//! - Saving specifications with atomic writes
//! - Loading specifications with tolerant parsing
//! - Content fingerprints for change detection

mod hash;
mod load;
mod save;

pub use hash::{compute_file_hash, content_fingerprint, specification_fingerprint};
pub use load::{load_specification, load_specification_async, parse_specification};
pub(crate) use save::write_atomic;
pub use save::{default_file_name, save_specification, save_specification_async, to_json_string};
