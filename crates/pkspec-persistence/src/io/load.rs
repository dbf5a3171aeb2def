//! Specification loading operations.

use std::fs;
use std::path::{Path, PathBuf};

use pkspec_model::PackagingSpecification;

use crate::error::{PersistenceError, Result};

/// Load a specification from a JSON file.
pub fn load_specification(path: &Path) -> Result<PackagingSpecification> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let specification = parse_specification(&text).map_err(|e| match e {
        PersistenceError::InvalidFormat { reason, .. } => PersistenceError::InvalidFormat {
            path: Some(path.to_path_buf()),
            reason,
        },
        other => other,
    })?;

    tracing::info!("Loaded specification from {}", path.display());
    Ok(specification)
}

/// Load a specification asynchronously.
///
/// Spawns the load operation on a blocking thread pool to avoid
/// blocking the async runtime.
pub async fn load_specification_async(path: PathBuf) -> Result<PackagingSpecification> {
    tokio::task::spawn_blocking(move || load_specification(&path))
        .await
        .map_err(|e| PersistenceError::Deserialization {
            source: Box::new(e),
        })?
}

/// Parse specification JSON.
///
/// Missing sections take their defaults; anything that is not a JSON object
/// of the expected shape is an invalid format.
pub fn parse_specification(text: &str) -> Result<PackagingSpecification> {
    let mut specification: PackagingSpecification =
        serde_json::from_str(text).map_err(|e| PersistenceError::InvalidFormat {
            path: None,
            reason: e.to_string(),
        })?;
    specification.normalize_roles();
    Ok(specification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::save_specification;
    use pkspec_core::WizardStore;
    use pkspec_model::{PackagingMaterial, PackagingMaterialType, ProductCategory};
    use tempfile::tempdir;

    #[test]
    fn test_load_specification_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.json");

        let mut store = WizardStore::new();
        store.set_product_categories(vec![ProductCategory::Cushion]);
        store.add_packaging_material(PackagingMaterial::new(PackagingMaterialType::ZipperBag));
        store.advance_from_type_selection().unwrap();
        let specification = store.full_data(chrono::Utc::now());

        save_specification(&specification, &path).unwrap();

        let loaded = load_specification(&path).unwrap();
        assert_eq!(loaded, specification);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{ not json").unwrap();

        let err = load_specification(&path).unwrap_err();
        assert!(matches!(
            &err,
            PersistenceError::InvalidFormat { path: Some(p), .. } if p == &path
        ));
        assert_eq!(err.user_message(), "잘못된 파일 형식입니다.");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_specification(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { operation: "read", .. }));
        assert_eq!(err.user_message(), "파일을 읽을 수 없습니다.");
    }

    #[test]
    fn test_parse_tags_first_label() {
        let text = r#"{
            "id": "legacy",
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z",
            "labelForms": [
                { "id": "l1", "packagingMaterialType": "innerBox", "packagingMaterialName": "인박스" }
            ]
        }"#;
        let specification = parse_specification(text).unwrap();
        assert!(specification.label_forms[0].is_first_label);
        assert!(specification.marking_forms.is_empty());
    }

    #[test]
    fn test_parse_empty_object_takes_defaults() {
        let specification = parse_specification("{}").unwrap();
        assert!(!specification.id.as_str().is_empty());
        assert!(specification.created_at.is_empty());
        assert!(specification.updated_at.is_empty());
        assert!(specification.marking_forms.is_empty());
        assert!(specification.label_forms.is_empty());
    }

    #[test]
    fn test_parse_type_selection_only() {
        let text = r#"{ "typeSelection": { "productCategories": ["cushion"] } }"#;
        let specification = parse_specification(text).unwrap();
        assert_eq!(
            specification.type_selection.product_categories,
            vec![ProductCategory::Cushion]
        );
    }

    #[test]
    fn test_load_data_replaces_blank_id() {
        let specification = parse_specification(r#"{ "id": "  " }"#).unwrap();
        assert_eq!(specification.id.as_str(), "  ");

        let mut store = WizardStore::new();
        store.load_data(specification);
        let id = store.document_id().cloned().unwrap();
        assert!(!id.as_str().trim().is_empty());
        assert_eq!(store.full_data(chrono::Utc::now()).id, id);
    }
}
