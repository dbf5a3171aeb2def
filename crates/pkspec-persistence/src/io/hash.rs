//! Content hashing for change detection.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pkspec_model::PackagingSpecification;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// SHA-256 of a value's JSON form, hex encoded.
pub fn content_fingerprint<T: Serialize>(value: &T) -> Result<String> {
    let bytes = serde_json::to_vec(value).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Fingerprint of a specification's content, ignoring its timestamps.
pub fn specification_fingerprint(specification: &PackagingSpecification) -> Result<String> {
    let mut content = specification.clone();
    content.created_at.clear();
    content.updated_at.clear();
    content_fingerprint(&content)
}

/// Compute SHA-256 hash of a file.
///
/// Uses buffered reading for efficient processing of large files.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| PersistenceError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pkspec_core::WizardStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_compute_file_hash() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Hello, World!").unwrap();
        temp_file.flush().unwrap();

        let hash = compute_file_hash(temp_file.path()).unwrap();

        // Known SHA-256 hash for "Hello, World!"
        assert_eq!(
            hash,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_fingerprint_ignores_timestamps() {
        let mut store = WizardStore::new();
        let now = Utc::now();
        let first = store.full_data(now);
        let later = store.full_data(now + Duration::minutes(5));
        assert_ne!(first.updated_at, later.updated_at);
        assert_eq!(
            specification_fingerprint(&first).unwrap(),
            specification_fingerprint(&later).unwrap()
        );

        store.set_packaging_method_description("수축 포장 후 박스 입고");
        let edited = store.full_data(now);
        assert_ne!(
            specification_fingerprint(&first).unwrap(),
            specification_fingerprint(&edited).unwrap()
        );
    }
}
