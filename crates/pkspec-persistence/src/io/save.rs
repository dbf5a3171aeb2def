//! Specification saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pkspec_model::PackagingSpecification;

use crate::error::{PersistenceError, Result};

/// Download name offered for a specification saved on `date`.
pub fn default_file_name(date: NaiveDate) -> String {
    format!("포장사양서_{}.json", date.format("%Y-%m-%d"))
}

/// Serialize a specification to pretty-printed JSON.
pub fn to_json_string(specification: &PackagingSpecification) -> Result<String> {
    serde_json::to_string_pretty(specification).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })
}

/// Save a specification as JSON.
///
/// Uses atomic write (temp file + rename) to prevent data corruption
/// on crash or power loss.
pub fn save_specification(specification: &PackagingSpecification, path: &Path) -> Result<()> {
    let json = to_json_string(specification)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!("Saved specification {} to {}", specification.id, path.display());
    Ok(())
}

/// Save a specification asynchronously.
///
/// Spawns the save operation on a blocking thread pool to avoid
/// blocking the async runtime.
pub async fn save_specification_async(
    specification: PackagingSpecification,
    path: PathBuf,
) -> Result<()> {
    tokio::task::spawn_blocking(move || save_specification(&specification, &path))
        .await
        .map_err(|e| PersistenceError::Serialization {
            source: Box::new(e),
        })?
}

/// Write `bytes` to `path` through a sibling temp file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}
