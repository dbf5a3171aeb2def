//! Tests for pkspec-model types.

use std::collections::HashSet;

use pkspec_model::{
    Catalog, CompositionField, CompositionPatch, MarkingComposition, MarkingConcern,
    MarkingPosition, MarkingSide, PackagingMaterialType, PackagingSpecification, PaletteType,
    ProductCategory, TargetType,
};

fn assert_unique_codes<T: Catalog>() {
    let codes: HashSet<&str> = T::all().iter().map(|value| value.code()).collect();
    assert_eq!(codes.len(), T::all().len(), "duplicate code in {}", T::NAME);
}

#[test]
fn catalog_codes_are_unique() {
    assert_unique_codes::<MarkingPosition>();
    assert_unique_codes::<PackagingMaterialType>();
    assert_unique_codes::<PaletteType>();
    assert_unique_codes::<ProductCategory>();
    assert_unique_codes::<TargetType>();
}

#[test]
fn disabling_keeps_other_keys() {
    let mut composition = MarkingComposition {
        has_management_number: true,
        management_number_line: Some(1),
        has_expiry_date: true,
        expiry_date_line: Some(2),
        has_other: true,
        other_side: Some(MarkingSide::Front),
        ..Default::default()
    };
    CompositionPatch::from(CompositionField::enabled(MarkingConcern::ExpiryDate, false))
        .apply_to(&mut composition);
    assert!(!composition.has_expiry_date);
    assert_eq!(composition.management_number_line, Some(1));
    assert_eq!(composition.expiry_date_line, Some(2));
    assert_eq!(composition.other_side, Some(MarkingSide::Front));
}

#[test]
fn specification_loads_with_missing_sections() {
    let json = r#"{
        "id": "abc",
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z",
        "typeSelection": {
            "productConfig": "set",
            "productCategories": ["tube"],
            "packagingMaterials": [{ "type": "outerBox" }]
        }
    }"#;
    let spec: PackagingSpecification = serde_json::from_str(json).expect("parse specification");
    assert_eq!(spec.type_selection.packaging_materials.len(), 1);
    assert!(spec.marking_forms.is_empty());
    assert_eq!(spec.loading_method.palette_type, PaletteType::Kpp);
    assert_eq!(spec.loading_method.boxes_per_layer, 0);
}
