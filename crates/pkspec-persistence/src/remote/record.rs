//! Stored specification rows.
//!
//! A record keeps each document section as an opaque JSON column next to
//! the bookkeeping fields, matching the hosted table layout.

use chrono::{DateTime, SecondsFormat, Utc};
use pkspec_model::{DocumentId, PackagingSpecification, SpecStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PersistenceError, Result};

/// Title given to records created without one.
pub const DEFAULT_TITLE: &str = "새 포장사양서";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationRecord {
    pub id: DocumentId,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub status: SpecStatus,
    #[serde(default)]
    pub type_selection: Value,
    #[serde(default)]
    pub packaging_method: Value,
    #[serde(default)]
    pub marking_forms: Value,
    #[serde(default)]
    pub label_forms: Value,
    #[serde(default)]
    pub palette_label: Value,
    #[serde(default)]
    pub loading_method: Value,
    #[serde(default)]
    pub additional_request: Value,
    pub created_at: String,
    pub updated_at: String,
}

fn to_column<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })
}

/// Null columns read as the section default.
fn from_column<T: DeserializeOwned + Default>(column: &str, value: &Value) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    T::deserialize(value).map_err(|e| PersistenceError::InvalidFormat {
        path: None,
        reason: format!("{column}: {e}"),
    })
}

pub(crate) fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SpecificationRecord {
    /// A draft record for `user_id` holding `specification`.
    pub fn from_specification(
        specification: &PackagingSpecification,
        user_id: impl Into<String>,
        title: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let stamp = timestamp(now);
        let mut record = Self {
            id: specification.id.clone(),
            user_id: user_id.into(),
            title: title.to_string(),
            status: SpecStatus::Draft,
            type_selection: Value::Null,
            packaging_method: Value::Null,
            marking_forms: Value::Null,
            label_forms: Value::Null,
            palette_label: Value::Null,
            loading_method: Value::Null,
            additional_request: Value::Null,
            created_at: stamp.clone(),
            updated_at: stamp,
        };
        record.set_content(specification)?;
        Ok(record)
    }

    /// Replace every section column with `specification`'s content.
    pub fn set_content(&mut self, specification: &PackagingSpecification) -> Result<()> {
        self.type_selection = to_column(&specification.type_selection)?;
        self.packaging_method = to_column(&specification.packaging_method)?;
        self.marking_forms = to_column(&specification.marking_forms)?;
        self.label_forms = to_column(&specification.label_forms)?;
        self.palette_label = to_column(&specification.palette_label)?;
        self.loading_method = to_column(&specification.loading_method)?;
        self.additional_request = to_column(&specification.additional_request)?;
        Ok(())
    }

    /// Rebuild the document snapshot from the stored columns.
    pub fn to_specification(&self) -> Result<PackagingSpecification> {
        let mut specification = PackagingSpecification {
            id: self.id.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            type_selection: from_column("type_selection", &self.type_selection)?,
            packaging_method: from_column("packaging_method", &self.packaging_method)?,
            marking_forms: from_column("marking_forms", &self.marking_forms)?,
            label_forms: from_column("label_forms", &self.label_forms)?,
            palette_label: from_column("palette_label", &self.palette_label)?,
            loading_method: from_column("loading_method", &self.loading_method)?,
            additional_request: from_column("additional_request", &self.additional_request)?,
        };
        specification.normalize_roles();
        Ok(specification)
    }
}
