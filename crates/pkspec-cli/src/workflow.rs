//! Command work that does not print: reading inputs, generating forms and
//! running pre-flight checks.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use pkspec_core::{
    DraftState, PreflightReport, WizardStore, check_marking_forms, check_type_selection,
};
use pkspec_model::{
    BoxTapingType, Catalog, CosmaxNumberFormat, ExpiryBasis, ExpiryDateFormat, LabelAttachCount,
    LabelAttachPosition, LabelFormatType, ManagementNumberType, ManufactureDateFormat,
    MarkingMethod, MarkingPosition, MarkingSide, PackagingMaterialType, PackagingSpecification,
    PaletteType, ProductCategory, ProductConfig, SpecStatus, TargetType, TubeCuttingLength,
    TubeCuttingShape, TypeSelectionData,
};
use pkspec_persistence::{AutoSaveConfig, DraftAutoSaver, DraftSaveOutcome};

/// One option catalog as (code, label) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListing {
    pub name: &'static str,
    pub entries: Vec<(&'static str, &'static str)>,
}

fn listing<T: Catalog>() -> CatalogListing {
    CatalogListing {
        name: T::NAME,
        entries: T::all()
            .iter()
            .map(|value| (value.code(), value.label()))
            .collect(),
    }
}

/// Every option catalog in the order the wizard presents them.
pub fn catalog_listings() -> Vec<CatalogListing> {
    vec![
        listing::<ProductConfig>(),
        listing::<ProductCategory>(),
        listing::<PackagingMaterialType>(),
        listing::<TargetType>(),
        listing::<MarkingMethod>(),
        listing::<MarkingPosition>(),
        listing::<ManagementNumberType>(),
        listing::<CosmaxNumberFormat>(),
        listing::<ExpiryDateFormat>(),
        listing::<ManufactureDateFormat>(),
        listing::<ExpiryBasis>(),
        listing::<MarkingSide>(),
        listing::<TubeCuttingShape>(),
        listing::<TubeCuttingLength>(),
        listing::<LabelFormatType>(),
        listing::<LabelAttachPosition>(),
        listing::<LabelAttachCount>(),
        listing::<BoxTapingType>(),
        listing::<PaletteType>(),
        listing::<SpecStatus>(),
    ]
}

pub fn load_type_selection(path: &Path) -> Result<TypeSelectionData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read type selection {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse type selection {}", path.display()))
}

/// Result of running the first wizard step on a type selection.
#[derive(Debug, Clone)]
pub struct Generation {
    pub report: PreflightReport,
    /// `None` when the pre-flight blocked the step.
    pub specification: Option<PackagingSpecification>,
    /// Wizard holding the generated forms, for draft storage.
    pub store: Option<WizardStore>,
}

/// Pre-flight the selection and, when nothing blocks, generate every form
/// into a fresh specification.
pub fn generate_specification(
    selection: TypeSelectionData,
    now: DateTime<Utc>,
) -> Result<Generation> {
    let report = check_type_selection(&selection);
    if report.is_blocked() {
        warn!(
            blocking = report.blocking_count(),
            "Type selection blocked; nothing generated"
        );
        return Ok(Generation {
            report,
            specification: None,
            store: None,
        });
    }

    let mut store = WizardStore::new();
    store.restore_draft(DraftState {
        type_selection: selection,
        ..DraftState::default()
    });
    store
        .advance_from_type_selection()
        .context("generate forms")?;
    let specification = store.full_data(now);
    info!(
        marking_forms = specification.marking_forms.len(),
        label_forms = specification.label_forms.len(),
        "Generated specification"
    );
    Ok(Generation {
        report,
        specification: Some(specification),
        store: Some(store),
    })
}

/// Write the wizard's draft to `path` now.
pub fn save_wizard_draft(store: &WizardStore, path: &Path) -> Result<DraftSaveOutcome> {
    DraftAutoSaver::new(path, AutoSaveConfig::immediate())
        .save_now(store)
        .with_context(|| format!("save draft {}", path.display()))
}

/// Restore a draft into a fresh wizard. `None` when the file does not exist.
pub fn resume_draft(path: &Path) -> Result<Option<WizardStore>> {
    let mut store = WizardStore::new();
    let restored = DraftAutoSaver::new(path, AutoSaveConfig::default())
        .restore(&mut store)
        .with_context(|| format!("restore draft {}", path.display()))?;
    if restored {
        info!(
            path = %path.display(),
            marking_forms = store.marking_forms().len(),
            "Resumed draft"
        );
    }
    Ok(restored.then_some(store))
}

/// Pre-flight of both editing steps of a saved specification.
pub fn check_specification(specification: &PackagingSpecification) -> PreflightReport {
    let mut report = check_type_selection(&specification.type_selection);
    report.merge(check_marking_forms(&specification.marking_forms));
    report
}
