//! Derives marking and label forms from the step-1 type selection.
//!
//! Generation is a pure function of the selection apart from the random form
//! ids. Callers replace their existing form lists with the result.

use pkspec_model::{
    BoxTapingType, LabelFormData, MarkingFormData, MarkingMethod, MarkingPosition,
    PackagingMaterialType, ProductCategory, ProductConfig, TargetType, TypeSelectionData,
};
use tracing::info;

pub const SINGLE_COMPONENT_NAME: &str = "구성품";
pub const SINGLE_BOX_NAME: &str = "단상자";
pub const SET_BOX_NAME: &str = "세트상자";

/// Default marking method and position for a component of `category`.
pub fn category_defaults(category: Option<ProductCategory>) -> (MarkingMethod, MarkingPosition) {
    match category {
        Some(ProductCategory::Tube) => (MarkingMethod::Engraving, MarkingPosition::SealingFace),
        Some(ProductCategory::Mask) => (MarkingMethod::Engraving, MarkingPosition::BackBottom),
        Some(ProductCategory::Sachet) => (MarkingMethod::Coding, MarkingPosition::BackBottom),
        _ => (MarkingMethod::Coding, MarkingPosition::Bottom),
    }
}

fn component_form(
    name: impl Into<String>,
    category: Option<ProductCategory>,
    first: bool,
) -> MarkingFormData {
    let (method, position) = category_defaults(category);
    MarkingFormData::new(name, TargetType::Component, method, position)
        .with_category(category)
        .with_first_component(first)
}

fn box_form(name: impl Into<String>, target_type: TargetType) -> MarkingFormData {
    MarkingFormData::new(
        name,
        target_type,
        MarkingMethod::Coding,
        MarkingPosition::Bottom,
    )
}

/// Build the marking forms for a type selection.
///
/// - single: component + individual box
/// - unboxed: component
/// - set: per component (component, optional individual box), then one set box
pub fn generate_marking_forms(selection: &TypeSelectionData) -> Vec<MarkingFormData> {
    let mut forms = Vec::new();
    match selection.product_config {
        ProductConfig::Single | ProductConfig::Unboxed => {
            let category = selection.product_categories.first().copied();
            forms.push(component_form(SINGLE_COMPONENT_NAME, category, true));
            if selection.product_config == ProductConfig::Single {
                forms.push(box_form(SINGLE_BOX_NAME, TargetType::IndividualBox));
            }
        }
        ProductConfig::Set => {
            for (index, component) in selection.components().iter().enumerate() {
                let name = if component.name.is_empty() {
                    format!("{SINGLE_COMPONENT_NAME} {}", index + 1)
                } else {
                    component.name.clone()
                };
                forms.push(component_form(
                    name.as_str(),
                    component.product_category,
                    index == 0,
                ));
                if component.has_individual_box {
                    forms.push(box_form(
                        format!("{name} {SINGLE_BOX_NAME}"),
                        TargetType::IndividualBox,
                    ));
                }
            }
            forms.push(box_form(SET_BOX_NAME, TargetType::SetBox));
        }
    }
    info!(
        config = %selection.product_config,
        forms = forms.len(),
        "Generated marking forms"
    );
    forms
}

/// Build one label form per packaging material, preserving order.
pub fn generate_label_forms(selection: &TypeSelectionData) -> Vec<LabelFormData> {
    let forms: Vec<LabelFormData> = selection
        .packaging_materials
        .iter()
        .enumerate()
        .map(|(index, material)| {
            let mut form = LabelFormData::new(material.material_type, material.display_name());
            if material.material_type == PackagingMaterialType::ZipperBag {
                form.has_taping = Some(false);
            } else {
                form.has_taping = Some(true);
                form.taping_type = Some(BoxTapingType::Straight);
            }
            form.is_first_label = index == 0;
            form
        })
        .collect();
    info!(forms = forms.len(), "Generated label forms");
    forms
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkspec_model::{PackagingMaterial, SetComponentInfo};

    fn selection(config: ProductConfig, categories: &[ProductCategory]) -> TypeSelectionData {
        TypeSelectionData {
            product_config: config,
            product_categories: categories.to_vec(),
            ..TypeSelectionData::default()
        }
    }

    #[test]
    fn test_single_tube() {
        let forms = generate_marking_forms(&selection(ProductConfig::Single, &[ProductCategory::Tube]));
        assert_eq!(forms.len(), 2);
        let component = &forms[0];
        assert_eq!(component.target_type, TargetType::Component);
        assert_eq!(component.target_name, "구성품");
        assert!(component.is_first_component);
        assert_eq!(component.product_category, Some(ProductCategory::Tube));
        assert_eq!(component.method, MarkingMethod::Engraving);
        assert_eq!(component.position, MarkingPosition::SealingFace);

        let individual = &forms[1];
        assert_eq!(individual.target_type, TargetType::IndividualBox);
        assert_eq!(individual.target_name, "단상자");
        assert!(!individual.is_first_component);
        assert_eq!(individual.product_category, None);
        assert_eq!(individual.method, MarkingMethod::Coding);
        assert_eq!(individual.position, MarkingPosition::Bottom);
    }

    #[test]
    fn test_unboxed_has_no_box() {
        let forms =
            generate_marking_forms(&selection(ProductConfig::Unboxed, &[ProductCategory::Sachet]));
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].position, MarkingPosition::BackBottom);
        assert_eq!(forms[0].method, MarkingMethod::Coding);
    }

    #[test]
    fn test_set_layout() {
        let mut input = selection(ProductConfig::Set, &[]);
        input.set_components = Some(vec![
            SetComponentInfo::new("c1", "토너").with_individual_box(true),
            SetComponentInfo::new("c2", "").with_category(ProductCategory::Mask),
        ]);
        let forms = generate_marking_forms(&input);
        let names: Vec<&str> = forms.iter().map(|f| f.target_name.as_str()).collect();
        assert_eq!(names, vec!["토너", "토너 단상자", "구성품 2", "세트상자"]);
        assert!(forms[0].is_first_component);
        assert!(forms.iter().skip(1).all(|f| !f.is_first_component));
        assert_eq!(forms[2].method, MarkingMethod::Engraving);
        assert_eq!(forms[3].target_type, TargetType::SetBox);
    }

    #[test]
    fn test_set_without_components_still_has_set_box() {
        let forms = generate_marking_forms(&selection(ProductConfig::Set, &[]));
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].target_type, TargetType::SetBox);
    }

    #[test]
    fn test_label_forms_follow_materials() {
        let mut input = selection(ProductConfig::Single, &[]);
        input.packaging_materials = vec![
            PackagingMaterial::new(PackagingMaterialType::ZipperBag),
            PackagingMaterial::new(PackagingMaterialType::Other).with_custom_name("파렛트랩"),
        ];
        let forms = generate_label_forms(&input);
        assert_eq!(forms.len(), 2);
        assert!(forms[0].is_first_label);
        assert_eq!(forms[0].has_taping, Some(false));
        assert_eq!(forms[0].taping_type, None);
        assert_eq!(forms[1].packaging_material_name, "파렛트랩");
        assert_eq!(forms[1].has_taping, Some(true));
        assert_eq!(forms[1].taping_type, Some(BoxTapingType::Straight));
        assert!(forms.iter().all(|f| f.format_type.is_none()));
    }
}
