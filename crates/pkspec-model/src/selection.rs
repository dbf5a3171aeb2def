//! Step-1 type selection: product configuration, categories, packaging
//! materials and set components.

use serde::{Deserialize, Serialize};

use crate::catalog::{PackagingMaterialType, ProductCategory, ProductConfig, label_or_other};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingMaterial {
    #[serde(rename = "type")]
    pub material_type: PackagingMaterialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

impl PackagingMaterial {
    pub fn new(material_type: PackagingMaterialType) -> Self {
        Self {
            material_type,
            custom_name: None,
        }
    }

    #[must_use]
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    /// Custom name when given, otherwise the catalog label.
    pub fn display_name(&self) -> String {
        match self.custom_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.material_type.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetComponentInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub has_individual_box: bool,
    #[serde(default)]
    pub has_individual_pouch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category_other: Option<String>,
}

impl SetComponentInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_individual_box: false,
            has_individual_pouch: false,
            product_category: None,
            product_category_other: None,
        }
    }

    #[must_use]
    pub fn with_individual_box(mut self, has_box: bool) -> Self {
        self.has_individual_box = has_box;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ProductCategory) -> Self {
        self.product_category = Some(category);
        self
    }
}

/// Assignment of a set component field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetComponentField {
    Name(String),
    HasIndividualBox(bool),
    HasIndividualPouch(bool),
    ProductCategory(Option<ProductCategory>),
    ProductCategoryOther(Option<String>),
}

impl SetComponentField {
    pub fn apply(&self, component: &mut SetComponentInfo) {
        match self {
            Self::Name(v) => component.name.clone_from(v),
            Self::HasIndividualBox(v) => component.has_individual_box = *v,
            Self::HasIndividualPouch(v) => component.has_individual_pouch = *v,
            Self::ProductCategory(v) => component.product_category = *v,
            Self::ProductCategoryOther(v) => component.product_category_other.clone_from(v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeSelectionData {
    pub product_config: ProductConfig,
    pub product_categories: Vec<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category_other: Option<String>,
    pub packaging_materials: Vec<PackagingMaterial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_components: Option<Vec<SetComponentInfo>>,
}

impl TypeSelectionData {
    pub fn new(config: ProductConfig) -> Self {
        Self {
            product_config: config,
            ..Self::default()
        }
    }

    pub fn components(&self) -> &[SetComponentInfo] {
        self.set_components.as_deref().unwrap_or_default()
    }

    /// Category labels, substituting the free text for `other`.
    pub fn category_labels(&self) -> Vec<String> {
        self.product_categories
            .iter()
            .map(|category| {
                label_or_other(
                    *category,
                    ProductCategory::Other,
                    self.product_category_other.as_deref(),
                )
            })
            .collect()
    }
}
