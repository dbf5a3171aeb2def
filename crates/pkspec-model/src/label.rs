//! Packaging-material and pallet labels.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    BoxTapingType, LabelAttachCount, LabelAttachPosition, LabelFormatType, PackagingMaterialType,
    label_or_other,
};
use crate::ids::{FormId, OtherItemId};

/// Checkbox items of a custom label, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelItemFlag {
    ProductName,
    Quantity,
    ManagementNumber,
    ExpiryDate,
    PackagingDate,
    ClientProductCode,
    EnglishName,
    BarcodeImage,
    BarcodeNumber,
}

impl LabelItemFlag {
    pub const ALL: [LabelItemFlag; 9] = [
        LabelItemFlag::ProductName,
        LabelItemFlag::Quantity,
        LabelItemFlag::ManagementNumber,
        LabelItemFlag::ExpiryDate,
        LabelItemFlag::PackagingDate,
        LabelItemFlag::ClientProductCode,
        LabelItemFlag::EnglishName,
        LabelItemFlag::BarcodeImage,
        LabelItemFlag::BarcodeNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LabelItemFlag::ProductName => "제품명",
            LabelItemFlag::Quantity => "수량",
            LabelItemFlag::ManagementNumber => "관리번호",
            LabelItemFlag::ExpiryDate => "사용기한",
            LabelItemFlag::PackagingDate => "포장(제조)일자",
            LabelItemFlag::ClientProductCode => "고객사제품코드",
            LabelItemFlag::EnglishName => "영문명",
            LabelItemFlag::BarcodeImage => "바코드(이미지)",
            LabelItemFlag::BarcodeNumber => "바코드(숫자)",
        }
    }
}

/// A free-text label item with a stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OtherLabelItemRepr")]
pub struct OtherLabelItem {
    pub id: OtherItemId,
    pub text: String,
}

impl OtherLabelItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: OtherItemId::generate(),
            text: text.into(),
        }
    }
}

/// Older documents store "other" items as bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum OtherLabelItemRepr {
    Item { id: OtherItemId, text: String },
    Text(String),
}

impl From<OtherLabelItemRepr> for OtherLabelItem {
    fn from(repr: OtherLabelItemRepr) -> Self {
        match repr {
            OtherLabelItemRepr::Item { id, text } => Self { id, text },
            OtherLabelItemRepr::Text(text) => Self::new(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomLabelItem {
    pub product_name: bool,
    pub quantity: bool,
    pub management_number: bool,
    pub expiry_date: bool,
    pub packaging_date: bool,
    pub client_product_code: bool,
    pub english_name: bool,
    pub barcode_image: bool,
    pub barcode_number: bool,
    pub others: Vec<OtherLabelItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_name_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_product_code_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_value: Option<String>,
}

impl CustomLabelItem {
    pub fn is_checked(&self, flag: LabelItemFlag) -> bool {
        match flag {
            LabelItemFlag::ProductName => self.product_name,
            LabelItemFlag::Quantity => self.quantity,
            LabelItemFlag::ManagementNumber => self.management_number,
            LabelItemFlag::ExpiryDate => self.expiry_date,
            LabelItemFlag::PackagingDate => self.packaging_date,
            LabelItemFlag::ClientProductCode => self.client_product_code,
            LabelItemFlag::EnglishName => self.english_name,
            LabelItemFlag::BarcodeImage => self.barcode_image,
            LabelItemFlag::BarcodeNumber => self.barcode_number,
        }
    }

    pub fn set_checked(&mut self, flag: LabelItemFlag, checked: bool) {
        let slot = match flag {
            LabelItemFlag::ProductName => &mut self.product_name,
            LabelItemFlag::Quantity => &mut self.quantity,
            LabelItemFlag::ManagementNumber => &mut self.management_number,
            LabelItemFlag::ExpiryDate => &mut self.expiry_date,
            LabelItemFlag::PackagingDate => &mut self.packaging_date,
            LabelItemFlag::ClientProductCode => &mut self.client_product_code,
            LabelItemFlag::EnglishName => &mut self.english_name,
            LabelItemFlag::BarcodeImage => &mut self.barcode_image,
            LabelItemFlag::BarcodeNumber => &mut self.barcode_number,
        };
        *slot = checked;
    }

    /// True when any checkbox is ticked or any "other" item exists.
    pub fn has_content(&self) -> bool {
        LabelItemFlag::ALL.iter().any(|flag| self.is_checked(*flag)) || !self.others.is_empty()
    }

    /// Checked item labels in declaration order, then "other" texts in
    /// insertion order.
    pub fn display_items(&self) -> Vec<String> {
        let mut items: Vec<String> = LabelItemFlag::ALL
            .iter()
            .filter(|flag| self.is_checked(**flag))
            .map(|flag| flag.label().to_string())
            .collect();
        items.extend(self.others.iter().map(|other| other.text.clone()));
        items
    }

    /// Filled-in product information as (label, value) pairs.
    pub fn product_info(&self) -> Vec<(&'static str, &str)> {
        let mut info = Vec::new();
        let candidates = [
            (self.product_name, "제품명", &self.product_name_value),
            (self.english_name, "영문명", &self.english_name_value),
            (
                self.client_product_code,
                "고객사제품코드",
                &self.client_product_code_value,
            ),
            (
                self.barcode_image || self.barcode_number,
                "바코드",
                &self.barcode_value,
            ),
        ];
        for (checked, label, value) in candidates {
            if let (true, Some(value)) = (checked, value.as_deref())
                && !value.trim().is_empty()
            {
                info.push((label, value));
            }
        }
        info
    }

    /// Take over the checkbox set of `source` and a copy of its "other"
    /// list with fresh item ids. Value holders are left as they are.
    pub fn adopt_checkboxes(&mut self, source: &CustomLabelItem) {
        for flag in LabelItemFlag::ALL {
            self.set_checked(flag, source.is_checked(flag));
        }
        self.others = fresh_others(&source.others);
    }

    /// Append a trimmed "other" item. Blank text is ignored.
    pub fn add_other(&mut self, text: &str) -> Option<OtherItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let item = OtherLabelItem::new(text);
        let id = item.id.clone();
        self.others.push(item);
        Some(id)
    }

    /// Remove the "other" item with the given id. Returns whether it existed.
    pub fn remove_other(&mut self, id: &OtherItemId) -> bool {
        let before = self.others.len();
        self.others.retain(|other| &other.id != id);
        self.others.len() != before
    }
}

/// Clone a list of "other" items, giving every copy a new id.
pub fn fresh_others(others: &[OtherLabelItem]) -> Vec<OtherLabelItem> {
    others
        .iter()
        .map(|other| OtherLabelItem::new(other.text.clone()))
        .collect()
}

/// Assignment of a custom label item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelItemField {
    Checked(LabelItemFlag, bool),
    ProductNameValue(Option<String>),
    EnglishNameValue(Option<String>),
    ClientProductCodeValue(Option<String>),
    BarcodeValue(Option<String>),
    /// Replace the whole "other" list.
    Others(Vec<OtherLabelItem>),
}

impl LabelItemField {
    pub fn apply(&self, items: &mut CustomLabelItem) {
        match self {
            Self::Checked(flag, checked) => items.set_checked(*flag, *checked),
            Self::ProductNameValue(v) => items.product_name_value.clone_from(v),
            Self::EnglishNameValue(v) => items.english_name_value.clone_from(v),
            Self::ClientProductCodeValue(v) => items.client_product_code_value.clone_from(v),
            Self::BarcodeValue(v) => items.barcode_value.clone_from(v),
            Self::Others(others) => items.others.clone_from(others),
        }
    }

    /// Version of this field a sibling label inherits from the first label.
    ///
    /// Siblings share the checkbox set and the "other" list (with fresh ids),
    /// the same two things `CustomLabelItem::adopt_checkboxes` copies when a
    /// sibling switches to the custom format. Value fields belong to the
    /// label they were typed into and yield `None`.
    pub fn for_sibling(&self) -> Option<Self> {
        match self {
            Self::Checked(flag, checked) => Some(Self::Checked(*flag, *checked)),
            Self::Others(others) => Some(Self::Others(fresh_others(others))),
            Self::ProductNameValue(_)
            | Self::EnglishNameValue(_)
            | Self::ClientProductCodeValue(_)
            | Self::BarcodeValue(_) => None,
        }
    }
}

/// A partial edit of a custom label item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomLabelPatch {
    fields: Vec<LabelItemField>,
}

impl CustomLabelPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: LabelItemField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[LabelItemField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn apply_to(&self, items: &mut CustomLabelItem) {
        for field in &self.fields {
            field.apply(items);
        }
    }

    /// The part of this patch siblings inherit; see
    /// [`LabelItemField::for_sibling`].
    pub fn for_sibling(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter_map(LabelItemField::for_sibling)
                .collect(),
        }
    }
}

impl From<LabelItemField> for CustomLabelPatch {
    fn from(field: LabelItemField) -> Self {
        Self {
            fields: vec![field],
        }
    }
}

/// Shared view over packaging-material labels and the pallet label.
pub trait LabelTarget {
    fn display_name(&self) -> String;
    fn format_type(&self) -> Option<LabelFormatType>;
    fn custom_items(&self) -> Option<&CustomLabelItem>;
    fn attach_position_text(&self) -> String;
    fn attach_count_text(&self) -> String;

    /// Custom label items shown for this label, if it uses a custom format.
    fn custom_display_items(&self) -> Vec<String> {
        match (self.format_type(), self.custom_items()) {
            (Some(LabelFormatType::Custom), Some(items)) => items.display_items(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelFormData {
    pub id: FormId,
    pub packaging_material_type: PackagingMaterialType,
    pub packaging_material_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<LabelFormatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separate_format_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label_items: Option<CustomLabelItem>,
    #[serde(default)]
    pub attach_position: LabelAttachPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_position_other: Option<String>,
    #[serde(default)]
    pub attach_count: LabelAttachCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_count_other: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_taping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taping_type: Option<BoxTapingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taping_other: Option<String>,
    #[serde(default)]
    pub is_custom_items_manually_edited: bool,
    /// Propagation source for custom label items.
    #[serde(default)]
    pub is_first_label: bool,
}

impl LabelFormData {
    pub fn new(material_type: PackagingMaterialType, name: impl Into<String>) -> Self {
        Self {
            id: FormId::generate(),
            packaging_material_type: material_type,
            packaging_material_name: name.into(),
            format_type: None,
            separate_format_image: None,
            custom_label_items: None,
            attach_position: LabelAttachPosition::ShortSide,
            attach_position_other: None,
            attach_count: LabelAttachCount::Single,
            attach_count_other: None,
            has_taping: None,
            taping_type: None,
            taping_other: None,
            is_custom_items_manually_edited: false,
            is_first_label: false,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.format_type == Some(LabelFormatType::Custom)
    }

    /// Taping text when taping applies to this material.
    pub fn taping_text(&self) -> Option<String> {
        if self.packaging_material_type == PackagingMaterialType::ZipperBag
            || self.has_taping != Some(true)
        {
            return None;
        }
        self.taping_type.map(|taping| {
            label_or_other(taping, BoxTapingType::Other, self.taping_other.as_deref())
        })
    }
}

impl LabelTarget for LabelFormData {
    fn display_name(&self) -> String {
        if self.packaging_material_type == PackagingMaterialType::Other {
            self.packaging_material_name.clone()
        } else {
            self.packaging_material_type.label().to_string()
        }
    }

    fn format_type(&self) -> Option<LabelFormatType> {
        self.format_type
    }

    fn custom_items(&self) -> Option<&CustomLabelItem> {
        self.custom_label_items.as_ref()
    }

    fn attach_position_text(&self) -> String {
        label_or_other(
            self.attach_position,
            LabelAttachPosition::Other,
            self.attach_position_other.as_deref(),
        )
    }

    fn attach_count_text(&self) -> String {
        label_or_other(
            self.attach_count,
            LabelAttachCount::Other,
            self.attach_count_other.as_deref(),
        )
    }
}

/// Assignment of a label form field other than its format and custom items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFormField {
    SeparateFormatImage(Option<String>),
    AttachPosition(LabelAttachPosition),
    AttachPositionOther(Option<String>),
    AttachCount(LabelAttachCount),
    AttachCountOther(Option<String>),
    HasTaping(Option<bool>),
    TapingType(Option<BoxTapingType>),
    TapingOther(Option<String>),
}

impl LabelFormField {
    pub fn apply(&self, form: &mut LabelFormData) {
        match self {
            Self::SeparateFormatImage(v) => form.separate_format_image.clone_from(v),
            Self::AttachPosition(v) => form.attach_position = *v,
            Self::AttachPositionOther(v) => form.attach_position_other.clone_from(v),
            Self::AttachCount(v) => form.attach_count = *v,
            Self::AttachCountOther(v) => form.attach_count_other.clone_from(v),
            Self::HasTaping(v) => form.has_taping = *v,
            Self::TapingType(v) => form.taping_type = *v,
            Self::TapingOther(v) => form.taping_other.clone_from(v),
        }
    }
}

/// The single pallet label of a specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteLabelData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_type: Option<LabelFormatType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separate_format_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_items: Option<CustomLabelItem>,
    pub attach_position: LabelAttachPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_position_other: Option<String>,
    pub attach_count: LabelAttachCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_count_other: Option<String>,
}

impl LabelTarget for PaletteLabelData {
    fn display_name(&self) -> String {
        "팔레트 라벨".to_string()
    }

    fn format_type(&self) -> Option<LabelFormatType> {
        self.format_type
    }

    fn custom_items(&self) -> Option<&CustomLabelItem> {
        self.custom_label_items.as_ref()
    }

    fn attach_position_text(&self) -> String {
        label_or_other(
            self.attach_position,
            LabelAttachPosition::Other,
            self.attach_position_other.as_deref(),
        )
    }

    fn attach_count_text(&self) -> String {
        label_or_other(
            self.attach_count,
            LabelAttachCount::Other,
            self.attach_count_other.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteLabelField {
    FormatType(Option<LabelFormatType>),
    SeparateFormatImage(Option<String>),
    AttachPosition(LabelAttachPosition),
    AttachPositionOther(Option<String>),
    AttachCount(LabelAttachCount),
    AttachCountOther(Option<String>),
}

impl PaletteLabelField {
    pub fn apply(&self, label: &mut PaletteLabelData) {
        match self {
            Self::FormatType(v) => label.format_type = *v,
            Self::SeparateFormatImage(v) => label.separate_format_image.clone_from(v),
            Self::AttachPosition(v) => label.attach_position = *v,
            Self::AttachPositionOther(v) => label.attach_position_other.clone_from(v),
            Self::AttachCount(v) => label.attach_count = *v,
            Self::AttachCountOther(v) => label.attach_count_other.clone_from(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_items_order() {
        let mut items = CustomLabelItem {
            barcode_number: true,
            product_name: true,
            ..Default::default()
        };
        items.add_other("  로트 스티커 ");
        assert_eq!(
            items.display_items(),
            vec!["제품명", "바코드(숫자)", "로트 스티커"]
        );
    }

    #[test]
    fn test_sibling_patch_keeps_checkboxes_and_others() {
        let mut source = CustomLabelItem::default();
        source.add_other("취급주의");
        let patch = CustomLabelPatch::new()
            .with(LabelItemField::Checked(LabelItemFlag::Quantity, true))
            .with(LabelItemField::EnglishNameValue(Some("Cream".to_string())))
            .with(LabelItemField::Others(source.others.clone()))
            .with(LabelItemField::ClientProductCodeValue(Some("C-01".to_string())));

        let sibling = patch.for_sibling();
        assert_eq!(sibling.fields().len(), 2);
        assert_eq!(
            sibling.fields()[0],
            LabelItemField::Checked(LabelItemFlag::Quantity, true)
        );
        let LabelItemField::Others(others) = &sibling.fields()[1] else {
            panic!("expected others");
        };
        assert_eq!(others[0].text, "취급주의");
        assert_ne!(others[0].id, source.others[0].id);
        assert!(
            CustomLabelPatch::from(LabelItemField::BarcodeValue(None))
                .for_sibling()
                .is_empty()
        );
    }

    #[test]
    fn test_add_blank_other_is_ignored() {
        let mut items = CustomLabelItem::default();
        assert!(items.add_other("   ").is_none());
        assert!(items.others.is_empty());
    }

    #[test]
    fn test_remove_other_by_id_keeps_duplicates() {
        let mut items = CustomLabelItem::default();
        let first = items.add_other("A").unwrap();
        items.add_other("A").unwrap();
        assert!(items.remove_other(&first));
        assert_eq!(items.others.len(), 1);
        assert!(!items.remove_other(&first));
    }

    #[test]
    fn test_adopt_checkboxes_renews_ids_and_keeps_values() {
        let mut source = CustomLabelItem {
            quantity: true,
            product_name_value: Some("크림".to_string()),
            ..Default::default()
        };
        source.add_other("X");
        let mut target = CustomLabelItem {
            english_name: true,
            english_name_value: Some("Cream".to_string()),
            ..Default::default()
        };
        target.adopt_checkboxes(&source);
        assert!(target.quantity);
        assert!(!target.english_name);
        assert_eq!(target.english_name_value.as_deref(), Some("Cream"));
        assert_eq!(target.product_name_value, None);
        assert_eq!(target.others[0].text, "X");
        assert_ne!(target.others[0].id, source.others[0].id);
    }

    #[test]
    fn test_legacy_string_others_load() {
        let json = r#"{"quantity": true, "others": ["A", {"id": "o1", "text": "B"}]}"#;
        let items: CustomLabelItem = serde_json::from_str(json).unwrap();
        assert_eq!(items.others[0].text, "A");
        assert_eq!(items.others[1].id.as_str(), "o1");
    }

    #[test]
    fn test_product_info_requires_checked_and_value() {
        let items = CustomLabelItem {
            product_name: true,
            product_name_value: Some("수분크림".to_string()),
            english_name: false,
            english_name_value: Some("Cream".to_string()),
            barcode_image: true,
            barcode_value: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(items.product_info(), vec![("제품명", "수분크림")]);
    }

    #[test]
    fn test_taping_text_skips_zipper_bags() {
        let mut form = LabelFormData::new(PackagingMaterialType::ZipperBag, "지퍼백");
        form.has_taping = Some(true);
        form.taping_type = Some(BoxTapingType::Straight);
        assert_eq!(form.taping_text(), None);

        form.packaging_material_type = PackagingMaterialType::OuterBox;
        assert_eq!(form.taping_text().as_deref(), Some("일자테이핑"));
    }
}
