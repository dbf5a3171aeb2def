//! Sync propagation of "first item" edits to sibling forms.
//!
//! Marking compositions: a human edit of the first component's composition
//! is copied to every sibling whose composition has not been edited by hand.
//! The expiry basis pair travels under its own manual-edit flag and never
//! reaches set boxes. Edits anywhere else stay on the edited form.
//!
//! Custom labels: a label switching to the custom format takes over the
//! first label's checkbox set, and human edits of the first label's items
//! reach siblings that are custom and untouched. Edits of other labels mark
//! them as diverged and never flow back.

use pkspec_model::{
    CompositionPatch, CustomLabelItem, CustomLabelPatch, FormId, LabelFormData, LabelFormatType,
    LabelItemField, MarkingFormData, OtherItemId, TargetType,
};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// Who caused an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// Direct user action; marks the form as manually edited.
    Human,
    /// Default assignment performed by the application itself.
    Internal,
}

impl EditOrigin {
    pub fn is_human(self) -> bool {
        matches!(self, EditOrigin::Human)
    }
}

/// Forms touched by one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub edited: FormId,
    /// Siblings that received the edit.
    pub synced: Vec<FormId>,
    /// Siblings left alone because they were edited by hand.
    pub skipped: Vec<FormId>,
}

impl SyncReport {
    fn new(edited: FormId) -> Self {
        Self {
            edited,
            synced: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

fn marking_index(forms: &[MarkingFormData], form_id: &FormId) -> Result<usize> {
    forms
        .iter()
        .position(|form| &form.id == form_id)
        .ok_or_else(|| {
            warn!(form_id = %form_id, "Composition edit for unknown marking form");
            CoreError::UnknownMarkingForm(form_id.clone())
        })
}

fn label_index(forms: &[LabelFormData], form_id: &FormId) -> Result<usize> {
    forms
        .iter()
        .position(|form| &form.id == form_id)
        .ok_or_else(|| {
            warn!(form_id = %form_id, "Edit for unknown label form");
            CoreError::UnknownLabelForm(form_id.clone())
        })
}

/// Apply a composition edit to one form and propagate it where due.
pub fn apply_composition_edit(
    forms: &mut [MarkingFormData],
    form_id: &FormId,
    patch: &CompositionPatch,
    origin: EditOrigin,
) -> Result<SyncReport> {
    let index = marking_index(forms, form_id)?;
    let touches_basis = patch.touches_expiry_basis();
    let mut report = SyncReport::new(form_id.clone());

    let target = &mut forms[index];
    patch.apply_to(&mut target.composition);
    if origin.is_human() {
        target.is_composition_manually_edited = true;
        if touches_basis {
            target.is_expiry_basis_manually_edited = true;
        }
    }
    if !(target.is_first_component && origin.is_human()) {
        debug!(form_id = %form_id, ?origin, "Composition edit applied locally");
        return Ok(report);
    }

    for (position, sibling) in forms.iter_mut().enumerate() {
        if position == index {
            continue;
        }
        if sibling.is_composition_manually_edited {
            report.skipped.push(sibling.id.clone());
            continue;
        }
        patch.apply_syncable_to(&mut sibling.composition);
        if touches_basis
            && !sibling.is_expiry_basis_manually_edited
            && sibling.target_type != TargetType::SetBox
        {
            patch.apply_expiry_basis_to(&mut sibling.composition);
        }
        report.synced.push(sibling.id.clone());
    }
    debug!(
        form_id = %form_id,
        synced = report.synced.len(),
        skipped = report.skipped.len(),
        "Composition edit propagated from first component"
    );
    Ok(report)
}

/// Set a label form's format.
///
/// Switching a non-first, untouched label to `custom` copies the first
/// label's checkbox set when that label is custom and has items.
pub fn select_label_format(
    forms: &mut [LabelFormData],
    form_id: &FormId,
    format: Option<LabelFormatType>,
) -> Result<SyncReport> {
    let index = label_index(forms, form_id)?;
    let source: Option<CustomLabelItem> = forms
        .iter()
        .find(|form| form.is_first_label && &form.id != form_id && form.is_custom())
        .and_then(|form| form.custom_label_items.clone());
    let mut report = SyncReport::new(form_id.clone());

    let form = &mut forms[index];
    form.format_type = format;
    if format != Some(LabelFormatType::Custom) {
        return Ok(report);
    }
    let items = form
        .custom_label_items
        .get_or_insert_with(CustomLabelItem::default);
    if form.is_first_label || form.is_custom_items_manually_edited {
        return Ok(report);
    }
    if let Some(source) = source {
        items.adopt_checkboxes(&source);
        report.synced.push(form.id.clone());
        debug!(form_id = %form_id, "Custom label items copied from first label");
    }
    Ok(report)
}

/// Apply an edit to a label form's custom items.
pub fn apply_custom_items_edit(
    forms: &mut [LabelFormData],
    form_id: &FormId,
    patch: &CustomLabelPatch,
    origin: EditOrigin,
) -> Result<SyncReport> {
    let index = label_index(forms, form_id)?;
    let mut report = SyncReport::new(form_id.clone());

    let form = &mut forms[index];
    patch.apply_to(
        form.custom_label_items
            .get_or_insert_with(CustomLabelItem::default),
    );
    if !origin.is_human() {
        return Ok(report);
    }
    if !form.is_first_label {
        form.is_custom_items_manually_edited = true;
        return Ok(report);
    }

    let sibling_patch = patch.for_sibling();
    if sibling_patch.is_empty() {
        return Ok(report);
    }
    for (position, sibling) in forms.iter_mut().enumerate() {
        if position == index || !sibling.is_custom() {
            continue;
        }
        if sibling.is_custom_items_manually_edited {
            report.skipped.push(sibling.id.clone());
            continue;
        }
        sibling_patch.apply_to(
            sibling
                .custom_label_items
                .get_or_insert_with(CustomLabelItem::default),
        );
        report.synced.push(sibling.id.clone());
    }
    debug!(
        form_id = %form_id,
        synced = report.synced.len(),
        "Custom label edit propagated from first label"
    );
    Ok(report)
}

/// Append an "other" item to a label form's custom items.
///
/// Returns the new item's id, or `None` for blank text.
pub fn add_custom_label_other(
    forms: &mut [LabelFormData],
    form_id: &FormId,
    text: &str,
    origin: EditOrigin,
) -> Result<Option<OtherItemId>> {
    let index = label_index(forms, form_id)?;
    let mut items = forms[index].custom_label_items.clone().unwrap_or_default();
    let Some(id) = items.add_other(text) else {
        return Ok(None);
    };
    let patch = CustomLabelPatch::from(LabelItemField::Others(items.others));
    apply_custom_items_edit(forms, form_id, &patch, origin)?;
    Ok(Some(id))
}

/// Remove an "other" item by id. Returns whether it existed.
pub fn remove_custom_label_other(
    forms: &mut [LabelFormData],
    form_id: &FormId,
    item_id: &OtherItemId,
    origin: EditOrigin,
) -> Result<bool> {
    let index = label_index(forms, form_id)?;
    let mut items = forms[index].custom_label_items.clone().unwrap_or_default();
    if !items.remove_other(item_id) {
        return Ok(false);
    }
    let patch = CustomLabelPatch::from(LabelItemField::Others(items.others));
    apply_custom_items_edit(forms, form_id, &patch, origin)?;
    Ok(true)
}
