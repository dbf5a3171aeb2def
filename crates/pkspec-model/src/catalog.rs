//! Option catalog: the fixed code/label enumerations used throughout a
//! packaging specification.
//!
//! Every enumeration serializes as its wire code (`"sealingFace"`,
//! `"LOT_ABC"`, ...) and exposes the Korean display label shown on forms
//! and in the rendered document. Parsing accepts the wire code
//! case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Common view over every catalog enumeration.
pub trait Catalog: Copy + Sized + 'static {
    /// Human-readable name of the catalog.
    const NAME: &'static str;

    /// All values in declaration order.
    fn all() -> &'static [Self];

    /// Wire code used in serialized documents.
    fn code(self) -> &'static str;

    /// Display label.
    fn label(self) -> &'static str;
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $title:literal {
            $($(#[$vmeta:meta])* $variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $code)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Catalog for $name {
            const NAME: &'static str = $title;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn code(self) -> &'static str {
                $name::code(self)
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.code().eq_ignore_ascii_case(normalized))
                    .ok_or_else(|| ModelError::UnknownCode {
                        catalog: $title,
                        code: s.to_string(),
                    })
            }
        }
    };
}

catalog! {
    /// Product configuration chosen in the first wizard step.
    #[derive(Default)]
    pub enum ProductConfig: "product config" {
        #[default]
        Single => ("single", "단품"),
        Unboxed => ("unboxed", "미품"),
        Set => ("set", "기획(세트)"),
    }
}

catalog! {
    pub enum ProductCategory: "product category" {
        Basic => ("basic", "기초"),
        Cushion => ("cushion", "쿠션"),
        Tube => ("tube", "튜브"),
        Sachet => ("sachet", "샤셰"),
        Mask => ("mask", "마스크"),
        Lipstick => ("lipstick", "립스틱/립글로즈"),
        Powder => ("powder", "파우더"),
        Other => ("other", "기타"),
    }
}

catalog! {
    pub enum PackagingMaterialType: "packaging material" {
        ZipperBag => ("zipperBag", "지퍼백"),
        InnerBox => ("innerBox", "인박스"),
        OuterBox => ("outerBox", "아웃박스"),
        RrpBox => ("rrpBox", "RRP박스"),
        Other => ("other", "기타"),
    }
}

catalog! {
    /// Kind of physical item a marking form describes.
    #[derive(Default)]
    pub enum TargetType: "target type" {
        #[default]
        Component => ("component", "구성품"),
        IndividualPouch => ("individualPouch", "파우치"),
        IndividualBox => ("individualBox", "단상자"),
        SetBox => ("setBox", "세트상자"),
    }
}

catalog! {
    #[derive(Default)]
    pub enum MarkingMethod: "marking method" {
        #[default]
        Coding => ("coding", "코딩"),
        Engraving => ("engraving", "각인"),
        Other => ("other", "기타"),
    }
}

catalog! {
    #[derive(Default)]
    pub enum MarkingPosition: "marking position" {
        #[default]
        Bottom => ("bottom", "하면"),
        Back => ("back", "후면"),
        SealingFace => ("sealingFace", "실링면"),
        FrontBottom => ("frontBottom", "전면 하단"),
        BackBottom => ("backBottom", "후면 하단"),
        Other => ("other", "기타"),
    }
}

impl MarkingPosition {
    /// Positions offered for a product category, in display order.
    pub fn options_for(category: Option<ProductCategory>) -> &'static [MarkingPosition] {
        match category {
            Some(ProductCategory::Tube) => &[
                MarkingPosition::SealingFace,
                MarkingPosition::Bottom,
                MarkingPosition::Back,
                MarkingPosition::Other,
            ],
            Some(ProductCategory::Sachet | ProductCategory::Mask) => &[
                MarkingPosition::Bottom,
                MarkingPosition::Back,
                MarkingPosition::FrontBottom,
                MarkingPosition::BackBottom,
                MarkingPosition::Other,
            ],
            _ => &[
                MarkingPosition::Bottom,
                MarkingPosition::Back,
                MarkingPosition::Other,
            ],
        }
    }
}

catalog! {
    pub enum ManagementNumberType: "management number type" {
        Cosmax => ("cosmax", "코스맥스관리번호"),
        Client => ("client", "고객사관리번호"),
    }
}

catalog! {
    pub enum CosmaxNumberFormat: "cosmax number format" {
        Abc => ("ABC", "ABC"),
        LotAbc => ("LOT_ABC", "LOT ABC"),
    }
}

catalog! {
    pub enum ExpiryDateFormat: "expiry date format" {
        Yyyymmdd => ("YYYYMMDD", "YYYYMMDD까지"),
        ExpYyyymmddUntil => ("EXP_YYYYMMDD_UNTIL", "EXP YYYYMMDD까지"),
        ExpYyyymmdd => ("EXP_YYYYMMDD", "EXP YYYYMMDD"),
        Other => ("other", "기타"),
    }
}

catalog! {
    pub enum ManufactureDateFormat: "manufacture date format" {
        YyyymmddMfg => ("YYYYMMDD_MFG", "YYYYMMDD제조"),
        MfgYyyymmdd => ("MFG_YYYYMMDD", "MFG YYYYMMDD제조"),
        MfdYyyymmdd => ("MFD_YYYYMMDD", "MFD YYYYMMDD제조"),
        Other => ("other", "기타"),
    }
}

catalog! {
    pub enum ExpiryBasis: "expiry basis" {
        BulkManufacture => ("bulkManufacture", "벌크제조일기준"),
        Packaging => ("packaging", "포장일기준"),
        Filling => ("filling", "충전일기준"),
    }
}

catalog! {
    /// Side of a tube's sealing face.
    pub enum MarkingSide: "marking side" {
        Front => ("front", "전면"),
        Back => ("back", "후면"),
    }
}

catalog! {
    pub enum TubeCuttingShape: "tube cutting shape" {
        Straight => ("straight", "일자 커팅"),
        Round => ("round", "라운드 커팅"),
        Other => ("other", "기타"),
    }
}

catalog! {
    pub enum TubeCuttingLength: "tube cutting length" {
        Minimum => ("minimum", "최소 길이로 커팅"),
        MatchBox => ("matchBox", "상자 맞춰서 커팅"),
        Custom => ("custom", "직접입력"),
    }
}

impl TubeCuttingLength {
    /// Cutting-length choices for a product configuration with their labels.
    ///
    /// "Match box" only exists when there is a box to match, and its label
    /// names that box.
    pub fn options_for(config: ProductConfig) -> Vec<(TubeCuttingLength, &'static str)> {
        let mut options = vec![(
            TubeCuttingLength::Minimum,
            TubeCuttingLength::Minimum.label(),
        )];
        match config {
            ProductConfig::Single => {
                options.push((TubeCuttingLength::MatchBox, "단상자 맞춰서 커팅"));
            }
            ProductConfig::Set => {
                options.push((TubeCuttingLength::MatchBox, "세트상자/트레이 맞춰서 커팅"));
            }
            ProductConfig::Unboxed => {}
        }
        options.push((TubeCuttingLength::Custom, TubeCuttingLength::Custom.label()));
        options
    }
}

catalog! {
    pub enum LabelFormatType: "label format" {
        None => ("none", "없음(부착필요X)"),
        Separate => ("separate", "별도양식"),
        Wms => ("wms", "WMS라벨"),
        Custom => ("custom", "직접입력"),
    }
}

catalog! {
    #[derive(Default)]
    pub enum LabelAttachPosition: "label attach position" {
        #[default]
        ShortSide => ("shortSide", "단측면"),
        LongSide => ("longSide", "장측면"),
        Top => ("top", "윗면"),
        Other => ("other", "기타"),
    }
}

catalog! {
    #[derive(Default)]
    pub enum LabelAttachCount: "label attach count" {
        #[default]
        Single => ("single", "1장"),
        BothSides => ("bothSides", "양면"),
        Other => ("other", "기타"),
    }
}

catalog! {
    pub enum BoxTapingType: "box taping" {
        Straight => ("straight", "일자테이핑"),
        HShape => ("hShape", "H자테이핑"),
        Other => ("other", "기타"),
    }
}

catalog! {
    #[derive(Default)]
    pub enum PaletteType: "palette type" {
        #[default]
        Kpp => ("kpp", "KPP팔레트"),
        Aju => ("aju", "아주팔레트"),
        ExportPlastic => ("exportPlastic", "수출용플라스틱팔레트"),
        Wood1200x1000 => ("wood1200x1000", "나무팔레트(1200*1000)"),
        Wood1200x800 => ("wood1200x800", "나무팔레트(1200*800)"),
        Other => ("other", "기타"),
    }
}

catalog! {
    /// Review status of a saved specification record.
    #[derive(Default)]
    pub enum SpecStatus: "specification status" {
        #[default]
        Draft => ("draft", "작성중"),
        Submitted => ("submitted", "제출됨"),
        Approved => ("approved", "승인됨"),
    }
}

/// Resolve the display text of a catalog value that may carry free text for
/// its `other` variant.
pub fn label_or_other<T: Catalog + PartialEq>(value: T, other: T, other_text: Option<&str>) -> String {
    if value == other {
        other_text.unwrap_or_default().to_string()
    } else {
        value.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for position in MarkingPosition::ALL {
            let parsed: MarkingPosition = position.code().parse().unwrap();
            assert_eq!(parsed, *position);
        }
        assert_eq!(
            "lot_abc".parse::<CosmaxNumberFormat>().unwrap(),
            CosmaxNumberFormat::LotAbc
        );
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "plastic".parse::<PaletteType>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownCode {
                catalog: "palette type",
                code: "plastic".to_string()
            }
        );
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&ExpiryDateFormat::ExpYyyymmddUntil).unwrap();
        assert_eq!(json, "\"EXP_YYYYMMDD_UNTIL\"");
        let parsed: PackagingMaterialType = serde_json::from_str("\"rrpBox\"").unwrap();
        assert_eq!(parsed, PackagingMaterialType::RrpBox);
    }

    #[test]
    fn test_position_options_per_category() {
        assert_eq!(
            MarkingPosition::options_for(Some(ProductCategory::Tube))[0],
            MarkingPosition::SealingFace
        );
        assert_eq!(
            MarkingPosition::options_for(Some(ProductCategory::Mask)).len(),
            5
        );
        assert_eq!(MarkingPosition::options_for(None).len(), 3);
    }

    #[test]
    fn test_cutting_length_options_depend_on_config() {
        let unboxed = TubeCuttingLength::options_for(ProductConfig::Unboxed);
        assert_eq!(unboxed.len(), 2);
        let set = TubeCuttingLength::options_for(ProductConfig::Set);
        assert_eq!(set[1], (TubeCuttingLength::MatchBox, "세트상자/트레이 맞춰서 커팅"));
    }

    #[test]
    fn test_label_or_other() {
        assert_eq!(
            label_or_other(PaletteType::Other, PaletteType::Other, Some("철제")),
            "철제"
        );
        assert_eq!(
            label_or_other(PaletteType::Aju, PaletteType::Other, Some("철제")),
            "아주팔레트"
        );
    }
}
