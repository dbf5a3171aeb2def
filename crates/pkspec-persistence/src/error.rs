//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-facing messages and optional remediation hints.

use std::path::PathBuf;

use pkspec_model::DocumentId;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not a packaging specification document.
    #[error("Invalid specification file format")]
    InvalidFormat {
        /// Source file, when the content came from disk.
        path: Option<PathBuf>,
        reason: String,
    },

    /// Serialization error.
    #[error("Failed to serialize specification data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Background load task failed.
    #[error("Failed to deserialize specification data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No stored record with this id.
    #[error("Specification record not found: {id}")]
    RecordNotFound { id: DocumentId },

    /// Record belongs to another user.
    #[error("User {user_id} may not modify record {id}")]
    Unauthorized { user_id: String, id: DocumentId },
}

impl PersistenceError {
    /// Get a user-facing message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                "파일을 읽을 수 없습니다.".to_string()
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { .. } => "잘못된 파일 형식입니다.".to_string(),
            Self::Serialization { .. } => {
                "An error occurred while saving the specification.".to_string()
            }
            Self::Deserialization { .. } => {
                "An error occurred while reading the specification.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::RecordNotFound { .. } => "포장사양서를 찾을 수 없습니다.".to_string(),
            Self::Unauthorized { .. } => "이 포장사양서에 대한 권한이 없습니다.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } => {
                Some("Make sure you selected a JSON file saved by this application.".into())
            }
            Self::Serialization { .. } | Self::Deserialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::RecordNotFound { .. } => Some("Refresh the list of specifications.".into()),
            Self::Unauthorized { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
