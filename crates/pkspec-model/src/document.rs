//! Free-text sections, pallet loading, and the full document snapshot.

use serde::{Deserialize, Serialize};

use crate::catalog::{PaletteType, label_or_other};
use crate::ids::DocumentId;
use crate::label::{LabelFormData, PaletteLabelData};
use crate::marking::MarkingFormData;
use crate::selection::TypeSelectionData;

/// Free-text description with attached images (data URLs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescribedImages {
    pub description: String,
    pub images: Vec<String>,
}

impl DescribedImages {
    pub fn add_image(&mut self, image: impl Into<String>) {
        self.images.push(image.into());
    }

    /// Remove the image at `index`. Out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }
}

pub type PackagingMethodData = DescribedImages;
pub type AdditionalRequestData = DescribedImages;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingMethodData {
    pub palette_type: PaletteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_type_other: Option<String>,
    pub boxes_per_layer: u32,
    pub layer_count: u32,
    /// Millimetres, pallet included.
    pub max_height: f64,
}

impl LoadingMethodData {
    pub fn total_boxes(&self) -> u64 {
        u64::from(self.boxes_per_layer) * u64::from(self.layer_count)
    }

    pub fn palette_text(&self) -> String {
        label_or_other(
            self.palette_type,
            PaletteType::Other,
            self.palette_type_other.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingMethodField {
    PaletteType(PaletteType),
    PaletteTypeOther(Option<String>),
    BoxesPerLayer(u32),
    LayerCount(u32),
    MaxHeight(f64),
}

impl LoadingMethodField {
    pub fn apply(&self, loading: &mut LoadingMethodData) {
        match self {
            Self::PaletteType(v) => loading.palette_type = *v,
            Self::PaletteTypeOther(v) => loading.palette_type_other.clone_from(v),
            Self::BoxesPerLayer(v) => loading.boxes_per_layer = *v,
            Self::LayerCount(v) => loading.layer_count = *v,
            Self::MaxHeight(v) => loading.max_height = *v,
        }
    }
}

/// Full snapshot of a packaging specification, as saved and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingSpecification {
    #[serde(default = "DocumentId::generate")]
    pub id: DocumentId,
    /// RFC 3339 timestamp; empty when the source file had none.
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp; empty when the source file had none.
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub type_selection: TypeSelectionData,
    #[serde(default)]
    pub packaging_method: PackagingMethodData,
    #[serde(default)]
    pub marking_forms: Vec<MarkingFormData>,
    #[serde(default)]
    pub label_forms: Vec<LabelFormData>,
    #[serde(default)]
    pub palette_label: PaletteLabelData,
    #[serde(default)]
    pub loading_method: LoadingMethodData,
    #[serde(default)]
    pub additional_request: AdditionalRequestData,
}

impl PackagingSpecification {
    /// Tag the first label form as the propagation source when no form
    /// carries the tag (documents written before the tag existed).
    pub fn normalize_roles(&mut self) {
        if !self.label_forms.iter().any(|form| form.is_first_label)
            && let Some(first) = self.label_forms.first_mut()
        {
            first.is_first_label = true;
        }
    }
}
