//! Integration tests for pkspec-persistence.

use chrono::Utc;
use pkspec_core::{WizardStep, WizardStore};
use pkspec_model::{
    CustomLabelPatch, LabelFormatType, LabelItemField, LabelItemFlag, MarkingConcern,
    PackagingMaterial, PackagingMaterialType, ProductConfig, SetComponentField,
};
use pkspec_persistence::{
    InMemoryRepository, SpecificationRepository, load_specification_async,
    save_specification_async, specification_fingerprint,
};
use tempfile::tempdir;

fn edited_store() -> WizardStore {
    let mut store = WizardStore::new();
    store.set_product_config(ProductConfig::Set);
    let component = store.type_selection().components()[0].id.clone();
    store
        .update_set_component(&component, SetComponentField::Name("앰플".to_string()))
        .unwrap();
    store.add_packaging_material(PackagingMaterial::new(PackagingMaterialType::InnerBox));
    store.add_packaging_material(PackagingMaterial::new(PackagingMaterialType::OuterBox));
    store.advance_from_type_selection().unwrap();

    let first = store.marking_forms()[0].id.clone();
    store
        .toggle_marking_concern(&first, MarkingConcern::ManagementNumber, true)
        .unwrap();

    let labels: Vec<_> = store.label_forms().iter().map(|f| f.id.clone()).collect();
    store
        .select_label_format(&labels[0], Some(LabelFormatType::Custom))
        .unwrap();
    store
        .update_custom_label_items(
            &labels[0],
            &CustomLabelPatch::from(LabelItemField::Checked(LabelItemFlag::ProductName, true)),
        )
        .unwrap();
    store
        .select_label_format(&labels[1], Some(LabelFormatType::Custom))
        .unwrap();
    store.add_custom_label_other(&labels[0], "취급주의").unwrap();
    store
}

#[tokio::test]
async fn async_save_and_load_restore_the_wizard() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spec.json");
    let mut store = edited_store();
    store.next_step();
    let specification = store.full_data(Utc::now());

    save_specification_async(specification.clone(), path.clone())
        .await
        .unwrap();
    let loaded = load_specification_async(path).await.unwrap();

    let mut restored = WizardStore::new();
    restored.load_data(loaded);
    assert_eq!(restored.current_step(), WizardStep::TypeSelection);
    assert_eq!(restored.draft(), store.draft());

    let second_label = &restored.label_forms()[1];
    let items = second_label.custom_label_items.as_ref().unwrap();
    assert!(items.product_name);
    assert_eq!(items.others.len(), 1);
    assert_eq!(items.others[0].text, "취급주의");
}

#[test]
fn repository_keeps_fingerprint_of_saved_content() {
    let repository = InMemoryRepository::new();
    let mut store = edited_store();
    let specification = store.full_data(Utc::now());

    let record = repository
        .create("user-1", &specification, Some("앰플 세트"))
        .unwrap();
    let restored = repository
        .get("user-1", &record.id)
        .unwrap()
        .to_specification()
        .unwrap();

    assert_eq!(
        specification_fingerprint(&restored).unwrap(),
        specification_fingerprint(&specification).unwrap()
    );
}
