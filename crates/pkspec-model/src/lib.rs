//! Data model for packaging specifications.
//!
//! Covers the option catalog, marking compositions and forms, label forms,
//! step-1 type selection, and the full document snapshot that is saved,
//! loaded and exported.

pub mod catalog;
pub mod composition;
pub mod document;
pub mod error;
pub mod ids;
pub mod label;
pub mod marking;
pub mod selection;

pub use catalog::{
    BoxTapingType, Catalog, CosmaxNumberFormat, ExpiryBasis, ExpiryDateFormat, LabelAttachCount,
    LabelAttachPosition, LabelFormatType, ManagementNumberType, ManufactureDateFormat,
    MarkingMethod, MarkingPosition, MarkingSide, PackagingMaterialType, PaletteType,
    ProductCategory, ProductConfig, SpecStatus, TargetType, TubeCuttingLength, TubeCuttingShape,
    label_or_other,
};
pub use composition::{CompositionField, CompositionPatch, MarkingComposition, MarkingConcern};
pub use document::{
    AdditionalRequestData, DescribedImages, LoadingMethodData, LoadingMethodField,
    PackagingMethodData, PackagingSpecification,
};
pub use error::{ModelError, Result};
pub use ids::{DocumentId, FormId, OtherItemId};
pub use label::{
    CustomLabelItem, CustomLabelPatch, LabelFormData, LabelFormField, LabelItemField,
    LabelItemFlag, LabelTarget, OtherLabelItem, PaletteLabelData, PaletteLabelField,
};
pub use marking::{MarkingFormData, MarkingFormField};
pub use selection::{PackagingMaterial, SetComponentField, SetComponentInfo, TypeSelectionData};
