//! Property tests for sibling propagation.

use pkspec_core::{EditOrigin, apply_composition_edit, generate_marking_forms};
use pkspec_model::{
    CompositionField, CompositionPatch, ExpiryBasis, MarkingConcern, MarkingFormData,
    ProductConfig, SetComponentInfo, TargetType, TypeSelectionData,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn set_forms(components: usize, boxed: bool) -> Vec<MarkingFormData> {
    let selection = TypeSelectionData {
        product_config: ProductConfig::Set,
        set_components: Some(
            (0..components)
                .map(|i| {
                    SetComponentInfo::new(i.to_string(), format!("c{i}")).with_individual_box(boxed)
                })
                .collect(),
        ),
        ..TypeSelectionData::default()
    };
    generate_marking_forms(&selection)
}

fn field_strategy() -> impl Strategy<Value = CompositionField> {
    prop_oneof![
        (prop::sample::select(MarkingConcern::ALL.to_vec()), any::<bool>())
            .prop_map(|(concern, on)| CompositionField::enabled(concern, on)),
        (prop::sample::select(MarkingConcern::ALL.to_vec()), prop::option::of(1u32..5))
            .prop_map(|(concern, line)| CompositionField::line(concern, line)),
        prop::option::of(prop::sample::select(ExpiryBasis::ALL.to_vec()))
            .prop_map(CompositionField::ExpiryBasis),
        prop::option::of(1u32..48).prop_map(CompositionField::ExpiryMonths),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    /// After any sequence of first-component edits, every untouched
    /// component mirrors the first one's syncable fields.
    #[test]
    fn untouched_siblings_follow_first_component(
        components in 2usize..5,
        fields in prop::collection::vec(field_strategy(), 1..12),
        manual in prop::collection::vec(any::<bool>(), 5),
    ) {
        let mut forms = set_forms(components, false);
        for (form, flag) in forms.iter_mut().skip(1).zip(&manual) {
            form.is_composition_manually_edited = *flag;
        }
        let before: Vec<_> = forms.iter().map(|f| f.composition.clone()).collect();
        let first = forms[0].id.clone();
        for field in fields {
            apply_composition_edit(
                &mut forms,
                &first,
                &CompositionPatch::from(field),
                EditOrigin::Human,
            ).unwrap();
        }

        let source = forms[0].composition.clone();
        for (index, form) in forms.iter().enumerate().skip(1) {
            if form.is_composition_manually_edited {
                prop_assert_eq!(&form.composition, &before[index]);
                continue;
            }
            for concern in MarkingConcern::ALL {
                prop_assert_eq!(form.composition.is_enabled(concern), source.is_enabled(concern));
                prop_assert_eq!(form.composition.line(concern), source.line(concern));
            }
            if form.target_type == TargetType::SetBox {
                prop_assert_eq!(form.composition.expiry_basis, None);
                prop_assert_eq!(form.composition.expiry_months, None);
            } else {
                prop_assert_eq!(form.composition.expiry_basis, source.expiry_basis);
                prop_assert_eq!(form.composition.expiry_months, source.expiry_months);
            }
        }
    }

    /// Edits on any form other than the first component stay local.
    #[test]
    fn non_first_edits_stay_local(
        target in 1usize..4,
        field in field_strategy(),
    ) {
        let mut forms = set_forms(2, true);
        let before: Vec<_> = forms.iter().map(|f| f.composition.clone()).collect();
        let id = forms[target].id.clone();
        let report = apply_composition_edit(
            &mut forms,
            &id,
            &CompositionPatch::from(field),
            EditOrigin::Human,
        ).unwrap();

        prop_assert!(report.synced.is_empty());
        prop_assert!(forms[target].is_composition_manually_edited);
        for (index, form) in forms.iter().enumerate() {
            if index != target {
                prop_assert_eq!(&form.composition, &before[index]);
            }
        }
    }

    /// Disabling a concern never changes any concern's ordering key.
    #[test]
    fn disabling_keeps_keys(
        lines in prop::collection::vec(prop::option::of(1u32..5), 4),
        concern in prop::sample::select(MarkingConcern::ALL.to_vec()),
    ) {
        let mut forms = set_forms(1, false);
        let id = forms[0].id.clone();
        let mut patch = CompositionPatch::new();
        for (concern, line) in MarkingConcern::ALL.iter().zip(&lines) {
            patch.push(CompositionField::enabled(*concern, true));
            patch.push(CompositionField::line(*concern, *line));
        }
        apply_composition_edit(&mut forms, &id, &patch, EditOrigin::Internal).unwrap();
        let keys_before: Vec<_> = MarkingConcern::ALL
            .iter()
            .map(|c| forms[0].composition.line(*c))
            .collect();

        apply_composition_edit(
            &mut forms,
            &id,
            &CompositionPatch::from(CompositionField::enabled(concern, false)),
            EditOrigin::Human,
        ).unwrap();
        let keys_after: Vec<_> = MarkingConcern::ALL
            .iter()
            .map(|c| forms[0].composition.line(*c))
            .collect();
        prop_assert_eq!(keys_before, keys_after);
    }
}
