//! Wizard state: one object holding the whole document being edited, with
//! one mutation method per user action.

use chrono::{DateTime, SecondsFormat, Utc};
use pkspec_model::{
    AdditionalRequestData, CompositionField, CompositionPatch, CustomLabelPatch, DocumentId,
    FormId, LabelFormData, LabelFormField, LabelFormatType, LoadingMethodData,
    LoadingMethodField, MarkingConcern, MarkingFormData, MarkingFormField, MarkingSide,
    OtherItemId, PackagingMaterial, PackagingMethodData, PackagingSpecification,
    PaletteLabelData, PaletteLabelField, ProductCategory, ProductConfig, SetComponentField,
    SetComponentInfo, TypeSelectionData,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::generator;
use crate::ordering::{OrderingMode, key_assignment};
use crate::preflight::{self, PreflightReport};
use crate::propagate::{self, EditOrigin, SyncReport};

// =============================================================================
// WIZARD STEP
// =============================================================================

/// Wizard page. Navigation is clamped to the first and last step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    /// Product type and packaging material selection
    #[default]
    TypeSelection,
    /// Marking, label and loading details
    Content,
    /// Document preview and export
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::TypeSelection,
        WizardStep::Content,
        WizardStep::Preview,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Self::TypeSelection => 1,
            Self::Content => 2,
            Self::Preview => 3,
        }
    }

    /// Step for a 1-based number, clamped into range.
    pub fn from_number(number: u8) -> Self {
        match number {
            0 | 1 => Self::TypeSelection,
            2 => Self::Content,
            _ => Self::Preview,
        }
    }

    pub fn next(self) -> Self {
        Self::from_number(self.number().saturating_add(1))
    }

    pub fn prev(self) -> Self {
        Self::from_number(self.number().saturating_sub(1))
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TypeSelection => "유형 선택",
            Self::Content => "상세 정보 입력",
            Self::Preview => "미리보기",
        }
    }
}

// =============================================================================
// DRAFT STATE
// =============================================================================

/// Persisted part of the wizard: everything except the current step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftState {
    pub type_selection: TypeSelectionData,
    pub packaging_method: PackagingMethodData,
    pub marking_forms: Vec<MarkingFormData>,
    pub label_forms: Vec<LabelFormData>,
    pub palette_label: PaletteLabelData,
    pub loading_method: LoadingMethodData,
    pub additional_request: AdditionalRequestData,
    pub document_id: Option<DocumentId>,
}

// =============================================================================
// WIZARD STORE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardStore {
    current_step: WizardStep,
    draft: DraftState,
    /// Bumped on every mutation; autosave compares it against the last
    /// saved revision.
    revision: u64,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn type_selection(&self) -> &TypeSelectionData {
        &self.draft.type_selection
    }

    pub fn packaging_method(&self) -> &PackagingMethodData {
        &self.draft.packaging_method
    }

    pub fn marking_forms(&self) -> &[MarkingFormData] {
        &self.draft.marking_forms
    }

    pub fn marking_form(&self, form_id: &FormId) -> Option<&MarkingFormData> {
        self.draft.marking_forms.iter().find(|form| &form.id == form_id)
    }

    pub fn label_forms(&self) -> &[LabelFormData] {
        &self.draft.label_forms
    }

    pub fn label_form(&self, form_id: &FormId) -> Option<&LabelFormData> {
        self.draft.label_forms.iter().find(|form| &form.id == form_id)
    }

    pub fn palette_label(&self) -> &PaletteLabelData {
        &self.draft.palette_label
    }

    pub fn loading_method(&self) -> &LoadingMethodData {
        &self.draft.loading_method
    }

    pub fn additional_request(&self) -> &AdditionalRequestData {
        &self.draft.additional_request
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.draft.document_id.as_ref()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn set_current_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn next_step(&mut self) -> WizardStep {
        self.current_step = self.current_step.next();
        self.current_step
    }

    pub fn prev_step(&mut self) -> WizardStep {
        self.current_step = self.current_step.prev();
        self.current_step
    }

    /// Pre-flight of the type selection without side effects.
    pub fn check_type_selection(&self) -> PreflightReport {
        preflight::check_type_selection(&self.draft.type_selection)
    }

    /// Pre-flight of the content step without side effects.
    pub fn check_content(&self) -> PreflightReport {
        preflight::check_marking_forms(&self.draft.marking_forms)
    }

    /// Leave step 1: run the pre-flight, regenerate every form list from the
    /// selection and move to step 2.
    ///
    /// Blocking issues leave the store untouched.
    pub fn advance_from_type_selection(&mut self) -> Result<PreflightReport> {
        let report = self.check_type_selection();
        if report.is_blocked() {
            debug!(
                blocking = report.blocking_count(),
                "Type selection blocked by pre-flight"
            );
            return Err(CoreError::BlockedStep(report.blocking_count()));
        }
        self.generate_marking_forms();
        self.generate_label_forms();
        self.current_step = WizardStep::Content;
        Ok(report)
    }

    // ========================================================================
    // Step 1: type selection
    // ========================================================================

    /// Switching to a set with no components seeds one empty component.
    pub fn set_product_config(&mut self, config: ProductConfig) {
        self.draft.type_selection.product_config = config;
        if config == ProductConfig::Set && self.draft.type_selection.components().is_empty() {
            self.add_empty_set_component();
        }
        self.touch();
    }

    pub fn set_product_categories(&mut self, categories: Vec<ProductCategory>) {
        self.draft.type_selection.product_categories = categories;
        self.touch();
    }

    pub fn set_product_category_other(&mut self, text: Option<String>) {
        self.draft.type_selection.product_category_other = text;
        self.touch();
    }

    pub fn set_packaging_materials(&mut self, materials: Vec<PackagingMaterial>) {
        self.draft.type_selection.packaging_materials = materials;
        self.touch();
    }

    pub fn add_packaging_material(&mut self, material: PackagingMaterial) {
        self.draft.type_selection.packaging_materials.push(material);
        self.touch();
    }

    /// Remove the material at `index`. Out-of-range indices are ignored.
    pub fn remove_packaging_material(&mut self, index: usize) -> Option<PackagingMaterial> {
        let materials = &mut self.draft.type_selection.packaging_materials;
        let removed = (index < materials.len()).then(|| materials.remove(index));
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn set_set_components(&mut self, components: Vec<SetComponentInfo>) {
        self.draft.type_selection.set_components = Some(components);
        self.touch();
    }

    /// Append a component and return its id.
    pub fn add_set_component(&mut self, component: SetComponentInfo) -> String {
        let id = component.id.clone();
        self.draft
            .type_selection
            .set_components
            .get_or_insert_with(Vec::new)
            .push(component);
        self.touch();
        id
    }

    /// Append an empty component with a fresh id and return the id.
    pub fn add_empty_set_component(&mut self) -> String {
        self.add_set_component(
            SetComponentInfo::new(new_component_id(), "").with_category(ProductCategory::Basic),
        )
    }

    pub fn remove_set_component(&mut self, component_id: &str) -> Result<SetComponentInfo> {
        let components = self
            .draft
            .type_selection
            .set_components
            .as_mut()
            .ok_or_else(|| CoreError::UnknownSetComponent(component_id.to_string()))?;
        let index = components
            .iter()
            .position(|component| component.id == component_id)
            .ok_or_else(|| CoreError::UnknownSetComponent(component_id.to_string()))?;
        let removed = components.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn update_set_component(
        &mut self,
        component_id: &str,
        field: SetComponentField,
    ) -> Result<()> {
        let component = self
            .draft
            .type_selection
            .set_components
            .iter_mut()
            .flatten()
            .find(|component| component.id == component_id)
            .ok_or_else(|| CoreError::UnknownSetComponent(component_id.to_string()))?;
        field.apply(component);
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Step 2: marking forms
    // ========================================================================

    /// Replace the marking forms with ones generated from the selection.
    pub fn generate_marking_forms(&mut self) {
        self.draft.marking_forms = generator::generate_marking_forms(&self.draft.type_selection);
        self.touch();
    }

    pub fn update_marking_form(&mut self, form_id: &FormId, field: MarkingFormField) -> Result<()> {
        let form = self
            .draft
            .marking_forms
            .iter_mut()
            .find(|form| &form.id == form_id)
            .ok_or_else(|| CoreError::UnknownMarkingForm(form_id.clone()))?;
        field.apply(form);
        self.touch();
        Ok(())
    }

    pub fn update_marking_composition(
        &mut self,
        form_id: &FormId,
        patch: &CompositionPatch,
        origin: EditOrigin,
    ) -> Result<SyncReport> {
        let report =
            propagate::apply_composition_edit(&mut self.draft.marking_forms, form_id, patch, origin)?;
        self.touch();
        Ok(report)
    }

    /// Switch a concern on or off.
    ///
    /// Enabling a concern that has no line (or side, for tube engraving)
    /// yet assigns the next free one on the edited form and on every
    /// sibling the enable reached. Each form gets a key from its own
    /// composition and layout.
    pub fn toggle_marking_concern(
        &mut self,
        form_id: &FormId,
        concern: MarkingConcern,
        enabled: bool,
    ) -> Result<SyncReport> {
        let patch = CompositionPatch::from(CompositionField::enabled(concern, enabled));
        let report = self.update_marking_composition(form_id, &patch, EditOrigin::Human)?;
        if !enabled {
            return Ok(report);
        }
        for target in std::iter::once(&report.edited).chain(&report.synced) {
            self.assign_ordering_key(target, concern)?;
        }
        Ok(report)
    }

    fn assign_ordering_key(&mut self, form_id: &FormId, concern: MarkingConcern) -> Result<()> {
        let assignment = self.marking_form(form_id).and_then(|form| {
            let mode = OrderingMode::for_tube_engraving(form.is_tube_engraving());
            key_assignment(&form.composition, concern, mode)
        });
        if let Some(field) = assignment {
            debug!(form_id = %form_id, ?field, "Assigned ordering key");
            self.update_marking_composition(
                form_id,
                &CompositionPatch::from(field),
                EditOrigin::Internal,
            )?;
        }
        Ok(())
    }

    pub fn set_concern_line(
        &mut self,
        form_id: &FormId,
        concern: MarkingConcern,
        line: Option<u32>,
    ) -> Result<SyncReport> {
        let patch = CompositionPatch::from(CompositionField::line(concern, line));
        self.update_marking_composition(form_id, &patch, EditOrigin::Human)
    }

    pub fn set_concern_side(
        &mut self,
        form_id: &FormId,
        concern: MarkingConcern,
        side: Option<MarkingSide>,
    ) -> Result<SyncReport> {
        let patch = CompositionPatch::from(CompositionField::side(concern, side));
        self.update_marking_composition(form_id, &patch, EditOrigin::Human)
    }

    // ========================================================================
    // Step 2: label forms
    // ========================================================================

    /// Replace the label forms with ones generated from the selection.
    pub fn generate_label_forms(&mut self) {
        self.draft.label_forms = generator::generate_label_forms(&self.draft.type_selection);
        self.touch();
    }

    pub fn select_label_format(
        &mut self,
        form_id: &FormId,
        format: Option<LabelFormatType>,
    ) -> Result<SyncReport> {
        let report = propagate::select_label_format(&mut self.draft.label_forms, form_id, format)?;
        self.touch();
        Ok(report)
    }

    pub fn update_label_form(&mut self, form_id: &FormId, field: LabelFormField) -> Result<()> {
        let form = self
            .draft
            .label_forms
            .iter_mut()
            .find(|form| &form.id == form_id)
            .ok_or_else(|| CoreError::UnknownLabelForm(form_id.clone()))?;
        field.apply(form);
        self.touch();
        Ok(())
    }

    pub fn update_custom_label_items(
        &mut self,
        form_id: &FormId,
        patch: &CustomLabelPatch,
    ) -> Result<SyncReport> {
        let report = propagate::apply_custom_items_edit(
            &mut self.draft.label_forms,
            form_id,
            patch,
            EditOrigin::Human,
        )?;
        self.touch();
        Ok(report)
    }

    pub fn add_custom_label_other(
        &mut self,
        form_id: &FormId,
        text: &str,
    ) -> Result<Option<OtherItemId>> {
        let id = propagate::add_custom_label_other(
            &mut self.draft.label_forms,
            form_id,
            text,
            EditOrigin::Human,
        )?;
        if id.is_some() {
            self.touch();
        }
        Ok(id)
    }

    pub fn remove_custom_label_other(
        &mut self,
        form_id: &FormId,
        item_id: &OtherItemId,
    ) -> Result<bool> {
        let removed = propagate::remove_custom_label_other(
            &mut self.draft.label_forms,
            form_id,
            item_id,
            EditOrigin::Human,
        )?;
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    // ========================================================================
    // Step 2: pallet label
    // ========================================================================

    /// Switching the pallet label to `custom` starts from an empty item set.
    pub fn update_palette_label(&mut self, field: PaletteLabelField) {
        field.apply(&mut self.draft.palette_label);
        if self.draft.palette_label.format_type == Some(LabelFormatType::Custom) {
            self.draft
                .palette_label
                .custom_label_items
                .get_or_insert_with(Default::default);
        }
        self.touch();
    }

    pub fn update_palette_custom_items(&mut self, patch: &CustomLabelPatch) {
        patch.apply_to(
            self.draft
                .palette_label
                .custom_label_items
                .get_or_insert_with(Default::default),
        );
        self.touch();
    }

    pub fn add_palette_other(&mut self, text: &str) -> Option<OtherItemId> {
        let id = self
            .draft
            .palette_label
            .custom_label_items
            .get_or_insert_with(Default::default)
            .add_other(text);
        if id.is_some() {
            self.touch();
        }
        id
    }

    pub fn remove_palette_other(&mut self, item_id: &OtherItemId) -> bool {
        let removed = self
            .draft
            .palette_label
            .custom_label_items
            .as_mut()
            .is_some_and(|items| items.remove_other(item_id));
        if removed {
            self.touch();
        }
        removed
    }

    // ========================================================================
    // Step 2: free-text sections and loading
    // ========================================================================

    pub fn set_packaging_method_description(&mut self, description: impl Into<String>) {
        self.draft.packaging_method.description = description.into();
        self.touch();
    }

    pub fn add_packaging_method_image(&mut self, image: impl Into<String>) {
        self.draft.packaging_method.add_image(image);
        self.touch();
    }

    pub fn remove_packaging_method_image(&mut self, index: usize) -> Option<String> {
        let removed = self.draft.packaging_method.remove_image(index);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn set_additional_request_description(&mut self, description: impl Into<String>) {
        self.draft.additional_request.description = description.into();
        self.touch();
    }

    pub fn add_additional_request_image(&mut self, image: impl Into<String>) {
        self.draft.additional_request.add_image(image);
        self.touch();
    }

    pub fn remove_additional_request_image(&mut self, index: usize) -> Option<String> {
        let removed = self.draft.additional_request.remove_image(index);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn update_loading_method(&mut self, field: LoadingMethodField) {
        field.apply(&mut self.draft.loading_method);
        self.touch();
    }

    // ========================================================================
    // Document I/O
    // ========================================================================

    /// Snapshot of the whole document, stamped with `now`.
    ///
    /// A store that was never saved gets a fresh document id, which the
    /// store keeps so repeated exports share it.
    pub fn full_data(&mut self, now: DateTime<Utc>) -> PackagingSpecification {
        let id = self
            .draft
            .document_id
            .get_or_insert_with(DocumentId::generate)
            .clone();
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        PackagingSpecification {
            id,
            created_at: stamp.clone(),
            updated_at: stamp,
            type_selection: self.draft.type_selection.clone(),
            packaging_method: self.draft.packaging_method.clone(),
            marking_forms: self.draft.marking_forms.clone(),
            label_forms: self.draft.label_forms.clone(),
            palette_label: self.draft.palette_label.clone(),
            loading_method: self.draft.loading_method.clone(),
            additional_request: self.draft.additional_request.clone(),
        }
    }

    /// Replace the whole document and return to step 1.
    pub fn load_data(&mut self, mut specification: PackagingSpecification) {
        specification.normalize_roles();
        if specification.id.as_str().trim().is_empty() {
            specification.id = DocumentId::generate();
        }
        info!(
            document_id = %specification.id,
            marking_forms = specification.marking_forms.len(),
            label_forms = specification.label_forms.len(),
            "Loaded specification into wizard"
        );
        self.draft = DraftState {
            type_selection: specification.type_selection,
            packaging_method: specification.packaging_method,
            marking_forms: specification.marking_forms,
            label_forms: specification.label_forms,
            palette_label: specification.palette_label,
            loading_method: specification.loading_method,
            additional_request: specification.additional_request,
            document_id: Some(specification.id),
        };
        self.current_step = WizardStep::TypeSelection;
        self.touch();
    }

    /// Discard everything and return to the initial state.
    pub fn reset(&mut self) {
        self.draft = DraftState::default();
        self.current_step = WizardStep::TypeSelection;
        self.touch();
    }

    // ========================================================================
    // Drafts
    // ========================================================================

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Restore a saved draft. The step is not part of a draft and restarts
    /// at 1.
    pub fn restore_draft(&mut self, mut draft: DraftState) {
        if !draft.label_forms.iter().any(|form| form.is_first_label)
            && let Some(first) = draft.label_forms.first_mut()
        {
            first.is_first_label = true;
        }
        self.draft = draft;
        self.current_step = WizardStep::TypeSelection;
        self.touch();
    }
}

fn new_component_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
