//! Marking composition: which items are printed or engraved on a target and
//! where each one goes.
//!
//! A composition holds four independently toggleable concerns (management
//! number, expiry date, manufacture date, free-text other). Each enabled
//! concern carries an ordering key: a line number in line mode, or a
//! front/back side when the target is a tube engraved on its sealing face.
//! The expiry basis pair (basis + months) belongs to the composition but is
//! not orderable.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    CosmaxNumberFormat, ExpiryBasis, ExpiryDateFormat, ManagementNumberType,
    ManufactureDateFormat, MarkingSide,
};

/// The orderable items of a marking composition, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkingConcern {
    ManagementNumber,
    ExpiryDate,
    ManufactureDate,
    Other,
}

impl MarkingConcern {
    pub const ALL: [MarkingConcern; 4] = [
        MarkingConcern::ManagementNumber,
        MarkingConcern::ExpiryDate,
        MarkingConcern::ManufactureDate,
        MarkingConcern::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MarkingConcern::ManagementNumber => "관리번호",
            MarkingConcern::ExpiryDate => "사용기한",
            MarkingConcern::ManufactureDate => "제조일자",
            MarkingConcern::Other => "기타",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkingComposition {
    pub has_management_number: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_number_type: Option<ManagementNumberType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmax_number_format: Option<CosmaxNumberFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_number_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_number_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_number_side: Option<MarkingSide>,

    pub has_expiry_date: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_format: Option<ExpiryDateFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_side: Option<MarkingSide>,

    pub has_manufacture_date: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date_format: Option<ManufactureDateFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date_custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date_side: Option<MarkingSide>,

    pub has_other: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_side: Option<MarkingSide>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_basis: Option<ExpiryBasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_months: Option<u32>,
}

impl MarkingComposition {
    pub fn is_enabled(&self, concern: MarkingConcern) -> bool {
        match concern {
            MarkingConcern::ManagementNumber => self.has_management_number,
            MarkingConcern::ExpiryDate => self.has_expiry_date,
            MarkingConcern::ManufactureDate => self.has_manufacture_date,
            MarkingConcern::Other => self.has_other,
        }
    }

    pub fn line(&self, concern: MarkingConcern) -> Option<u32> {
        match concern {
            MarkingConcern::ManagementNumber => self.management_number_line,
            MarkingConcern::ExpiryDate => self.expiry_date_line,
            MarkingConcern::ManufactureDate => self.manufacture_date_line,
            MarkingConcern::Other => self.other_line,
        }
    }

    pub fn side(&self, concern: MarkingConcern) -> Option<MarkingSide> {
        match concern {
            MarkingConcern::ManagementNumber => self.management_number_side,
            MarkingConcern::ExpiryDate => self.expiry_date_side,
            MarkingConcern::ManufactureDate => self.manufacture_date_side,
            MarkingConcern::Other => self.other_side,
        }
    }

    /// Enabled concerns in declaration order.
    pub fn enabled_concerns(&self) -> impl Iterator<Item = MarkingConcern> + '_ {
        MarkingConcern::ALL
            .into_iter()
            .filter(|concern| self.is_enabled(*concern))
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled_concerns().count()
    }

    /// True when a date concern is enabled, which makes the expiry basis
    /// pair meaningful.
    pub fn uses_dates(&self) -> bool {
        self.has_expiry_date || self.has_manufacture_date
    }
}

/// A single field assignment on a [`MarkingComposition`].
///
/// Optional fields take `None` to clear the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionField {
    HasManagementNumber(bool),
    ManagementNumberType(Option<ManagementNumberType>),
    CosmaxNumberFormat(Option<CosmaxNumberFormat>),
    ClientNumberDescription(Option<String>),
    ManagementNumberLine(Option<u32>),
    ManagementNumberSide(Option<MarkingSide>),
    HasExpiryDate(bool),
    ExpiryDateFormat(Option<ExpiryDateFormat>),
    ExpiryDateCustom(Option<String>),
    ExpiryDateLine(Option<u32>),
    ExpiryDateSide(Option<MarkingSide>),
    HasManufactureDate(bool),
    ManufactureDateFormat(Option<ManufactureDateFormat>),
    ManufactureDateCustom(Option<String>),
    ManufactureDateLine(Option<u32>),
    ManufactureDateSide(Option<MarkingSide>),
    HasOther(bool),
    OtherDescription(Option<String>),
    OtherLine(Option<u32>),
    OtherSide(Option<MarkingSide>),
    ExpiryBasis(Option<ExpiryBasis>),
    ExpiryMonths(Option<u32>),
}

impl CompositionField {
    pub fn enabled(concern: MarkingConcern, enabled: bool) -> Self {
        match concern {
            MarkingConcern::ManagementNumber => Self::HasManagementNumber(enabled),
            MarkingConcern::ExpiryDate => Self::HasExpiryDate(enabled),
            MarkingConcern::ManufactureDate => Self::HasManufactureDate(enabled),
            MarkingConcern::Other => Self::HasOther(enabled),
        }
    }

    pub fn line(concern: MarkingConcern, line: Option<u32>) -> Self {
        match concern {
            MarkingConcern::ManagementNumber => Self::ManagementNumberLine(line),
            MarkingConcern::ExpiryDate => Self::ExpiryDateLine(line),
            MarkingConcern::ManufactureDate => Self::ManufactureDateLine(line),
            MarkingConcern::Other => Self::OtherLine(line),
        }
    }

    pub fn side(concern: MarkingConcern, side: Option<MarkingSide>) -> Self {
        match concern {
            MarkingConcern::ManagementNumber => Self::ManagementNumberSide(side),
            MarkingConcern::ExpiryDate => Self::ExpiryDateSide(side),
            MarkingConcern::ManufactureDate => Self::ManufactureDateSide(side),
            MarkingConcern::Other => Self::OtherSide(side),
        }
    }

    /// Fields that follow the first component to its siblings.
    pub fn is_syncable(&self) -> bool {
        !self.is_expiry_basis()
    }

    /// Fields of the expiry basis pair, which propagate under their own flag.
    pub fn is_expiry_basis(&self) -> bool {
        matches!(self, Self::ExpiryBasis(_) | Self::ExpiryMonths(_))
    }

    pub fn apply(&self, composition: &mut MarkingComposition) {
        match self {
            Self::HasManagementNumber(v) => composition.has_management_number = *v,
            Self::ManagementNumberType(v) => composition.management_number_type = *v,
            Self::CosmaxNumberFormat(v) => composition.cosmax_number_format = *v,
            Self::ClientNumberDescription(v) => {
                composition.client_number_description.clone_from(v);
            }
            Self::ManagementNumberLine(v) => composition.management_number_line = *v,
            Self::ManagementNumberSide(v) => composition.management_number_side = *v,
            Self::HasExpiryDate(v) => composition.has_expiry_date = *v,
            Self::ExpiryDateFormat(v) => composition.expiry_date_format = *v,
            Self::ExpiryDateCustom(v) => composition.expiry_date_custom.clone_from(v),
            Self::ExpiryDateLine(v) => composition.expiry_date_line = *v,
            Self::ExpiryDateSide(v) => composition.expiry_date_side = *v,
            Self::HasManufactureDate(v) => composition.has_manufacture_date = *v,
            Self::ManufactureDateFormat(v) => composition.manufacture_date_format = *v,
            Self::ManufactureDateCustom(v) => {
                composition.manufacture_date_custom.clone_from(v);
            }
            Self::ManufactureDateLine(v) => composition.manufacture_date_line = *v,
            Self::ManufactureDateSide(v) => composition.manufacture_date_side = *v,
            Self::HasOther(v) => composition.has_other = *v,
            Self::OtherDescription(v) => composition.other_description.clone_from(v),
            Self::OtherLine(v) => composition.other_line = *v,
            Self::OtherSide(v) => composition.other_side = *v,
            Self::ExpiryBasis(v) => composition.expiry_basis = *v,
            Self::ExpiryMonths(v) => composition.expiry_months = *v,
        }
    }
}

/// A partial edit of a composition: the set of fields being written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionPatch {
    fields: Vec<CompositionField>,
}

impl CompositionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: CompositionField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: CompositionField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[CompositionField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn touches_expiry_basis(&self) -> bool {
        self.fields.iter().any(CompositionField::is_expiry_basis)
    }

    /// Apply every field, in order.
    pub fn apply_to(&self, composition: &mut MarkingComposition) {
        for field in &self.fields {
            field.apply(composition);
        }
    }

    /// Apply only the syncable fields.
    pub fn apply_syncable_to(&self, composition: &mut MarkingComposition) {
        for field in self.fields.iter().filter(|f| f.is_syncable()) {
            field.apply(composition);
        }
    }

    /// Apply only the expiry basis pair.
    pub fn apply_expiry_basis_to(&self, composition: &mut MarkingComposition) {
        for field in self.fields.iter().filter(|f| f.is_expiry_basis()) {
            field.apply(composition);
        }
    }
}

impl From<CompositionField> for CompositionPatch {
    fn from(field: CompositionField) -> Self {
        Self {
            fields: vec![field],
        }
    }
}

impl FromIterator<CompositionField> for CompositionPatch {
    fn from_iter<I: IntoIterator<Item = CompositionField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
