//! Marking forms: one per component or box that receives a printed or
//! engraved marking.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    MarkingMethod, MarkingPosition, ProductCategory, TargetType, TubeCuttingLength,
    TubeCuttingShape,
};
use crate::composition::MarkingComposition;
use crate::ids::FormId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingFormData {
    pub id: FormId,
    pub target_name: String,
    pub target_type: TargetType,
    /// Propagation source for composition edits.
    #[serde(default)]
    pub is_first_component: bool,
    /// Set on component forms only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    #[serde(default)]
    pub method: MarkingMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_other: Option<String>,
    #[serde(default)]
    pub position: MarkingPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_other: Option<String>,
    /// Embedded image data (data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube_cutting_shape: Option<TubeCuttingShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube_cutting_shape_other: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube_cutting_length: Option<TubeCuttingLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tube_cutting_length_custom: Option<String>,
    #[serde(default)]
    pub composition: MarkingComposition,
    #[serde(default)]
    pub is_composition_manually_edited: bool,
    #[serde(default)]
    pub is_expiry_basis_manually_edited: bool,
}

impl MarkingFormData {
    /// A fresh form with an empty composition and both manual-edit flags
    /// cleared.
    pub fn new(
        target_name: impl Into<String>,
        target_type: TargetType,
        method: MarkingMethod,
        position: MarkingPosition,
    ) -> Self {
        Self {
            id: FormId::generate(),
            target_name: target_name.into(),
            target_type,
            is_first_component: false,
            product_category: None,
            method,
            method_other: None,
            position,
            position_other: None,
            position_image: None,
            tube_cutting_shape: None,
            tube_cutting_shape_other: None,
            tube_cutting_length: None,
            tube_cutting_length_custom: None,
            composition: MarkingComposition::default(),
            is_composition_manually_edited: false,
            is_expiry_basis_manually_edited: false,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<ProductCategory>) -> Self {
        self.product_category = category;
        self
    }

    #[must_use]
    pub fn with_first_component(mut self, first: bool) -> Self {
        self.is_first_component = first;
        self
    }

    pub fn is_tube(&self) -> bool {
        self.product_category == Some(ProductCategory::Tube)
    }

    /// Tube engraved on its sealing face: compositions are ordered by side
    /// instead of by line.
    pub fn is_tube_engraving(&self) -> bool {
        self.is_tube()
            && self.method == MarkingMethod::Engraving
            && self.position == MarkingPosition::SealingFace
    }

    pub fn position_options(&self) -> &'static [MarkingPosition] {
        MarkingPosition::options_for(self.product_category)
    }
}

/// Assignment of a non-composition marking form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkingFormField {
    TargetName(String),
    Method(MarkingMethod),
    MethodOther(Option<String>),
    Position(MarkingPosition),
    PositionOther(Option<String>),
    PositionImage(Option<String>),
    TubeCuttingShape(Option<TubeCuttingShape>),
    TubeCuttingShapeOther(Option<String>),
    TubeCuttingLength(Option<TubeCuttingLength>),
    TubeCuttingLengthCustom(Option<String>),
}

impl MarkingFormField {
    pub fn apply(&self, form: &mut MarkingFormData) {
        match self {
            Self::TargetName(v) => form.target_name.clone_from(v),
            Self::Method(v) => form.method = *v,
            Self::MethodOther(v) => form.method_other.clone_from(v),
            Self::Position(v) => form.position = *v,
            Self::PositionOther(v) => form.position_other.clone_from(v),
            Self::PositionImage(v) => form.position_image.clone_from(v),
            Self::TubeCuttingShape(v) => form.tube_cutting_shape = *v,
            Self::TubeCuttingShapeOther(v) => form.tube_cutting_shape_other.clone_from(v),
            Self::TubeCuttingLength(v) => form.tube_cutting_length = *v,
            Self::TubeCuttingLengthCustom(v) => form.tube_cutting_length_custom.clone_from(v),
        }
    }
}
