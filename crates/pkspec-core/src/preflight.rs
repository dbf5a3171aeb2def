//! Presence checks run before leaving a wizard step.
//!
//! Blocking issues keep the wizard on its step. Confirmation issues are
//! shown to the user, who may continue anyway.

use pkspec_model::{MarkingFormData, ProductConfig, TypeSelectionData};
use serde::{Deserialize, Serialize};

use crate::ordering::OrderingMode;
use crate::preview::implicit_line_concerns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Blocking,
    Confirm,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Blocking => "blocking",
            IssueSeverity::Confirm => "confirm",
        }
    }
}

/// A single pre-flight finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightIssue {
    /// Stable check code (e.g., "PK001").
    pub code: String,
    pub message: String,
    pub severity: IssueSeverity,
    /// Name of the form or component the issue points at.
    pub target: Option<String>,
}

impl PreflightIssue {
    fn blocking(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: IssueSeverity::Blocking,
            target: None,
        }
    }

    fn confirm(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: IssueSeverity::Confirm,
            target: None,
        }
    }

    #[must_use]
    fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightReport {
    pub issues: Vec<PreflightIssue>,
}

impl PreflightReport {
    pub fn blocking_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Blocking)
            .count()
    }

    pub fn confirm_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Confirm)
            .count()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocking_count() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn merge(&mut self, other: PreflightReport) {
        self.issues.extend(other.issues);
    }
}

/// Checks for leaving the type-selection step.
pub fn check_type_selection(selection: &TypeSelectionData) -> PreflightReport {
    let mut issues = Vec::new();
    if selection.packaging_materials.is_empty() {
        issues.push(PreflightIssue::blocking(
            "PK001",
            "포장재를 하나 이상 선택해주세요.",
        ));
    }
    if selection.product_config == ProductConfig::Set {
        let components = selection.components();
        if components.is_empty() {
            issues.push(PreflightIssue::blocking(
                "PK002",
                "세트 구성품을 하나 이상 추가해주세요.",
            ));
        }
        for (index, component) in components.iter().enumerate() {
            if component.name.trim().is_empty() {
                issues.push(
                    PreflightIssue::blocking("PK003", "구성품 이름을 입력해주세요.")
                        .with_target(format!("구성품 {}", index + 1)),
                );
            }
        }
    } else if selection.product_categories.is_empty() {
        issues.push(PreflightIssue::blocking(
            "PK004",
            "제품 유형을 하나 이상 선택해주세요.",
        ));
    }
    PreflightReport { issues }
}

/// Checks for leaving the content step.
pub fn check_marking_forms(forms: &[MarkingFormData]) -> PreflightReport {
    let mut issues = Vec::new();
    if !forms.is_empty()
        && !forms
            .iter()
            .any(|form| form.composition.has_management_number)
    {
        issues.push(PreflightIssue::confirm(
            "PK101",
            "관리번호가 설정된 착인 정보가 없습니다. 계속하시겠습니까?",
        ));
    }
    for form in forms {
        let mode = OrderingMode::for_tube_engraving(form.is_tube_engraving());
        if mode != OrderingMode::Line || form.composition.enabled_count() < 2 {
            continue;
        }
        let implicit = implicit_line_concerns(&form.composition);
        if !implicit.is_empty() {
            let names: Vec<&str> = implicit.iter().map(|concern| concern.label()).collect();
            issues.push(
                PreflightIssue::confirm(
                    "PK102",
                    format!("줄이 지정되지 않은 항목은 1줄에 표시됩니다: {}", names.join(", ")),
                )
                .with_target(form.target_name.clone()),
            );
        }
    }
    PreflightReport { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkspec_model::{
        MarkingComposition, MarkingMethod, MarkingPosition, PackagingMaterial,
        PackagingMaterialType, ProductCategory, SetComponentInfo, TargetType,
    };

    #[test]
    fn test_empty_selection_is_blocked() {
        let report = check_type_selection(&TypeSelectionData::default());
        let codes: Vec<&str> = report.issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["PK001", "PK004"]);
        assert!(report.is_blocked());
    }

    #[test]
    fn test_set_requires_named_components() {
        let selection = TypeSelectionData {
            product_config: ProductConfig::Set,
            packaging_materials: vec![PackagingMaterial::new(PackagingMaterialType::OuterBox)],
            set_components: Some(vec![
                SetComponentInfo::new("a", "토너"),
                SetComponentInfo::new("b", "  "),
            ]),
            ..TypeSelectionData::default()
        };
        let report = check_type_selection(&selection);
        assert_eq!(report.blocking_count(), 1);
        assert_eq!(report.issues[0].code, "PK003");
        assert_eq!(report.issues[0].target.as_deref(), Some("구성품 2"));
    }

    #[test]
    fn test_valid_single_selection() {
        let selection = TypeSelectionData {
            product_config: ProductConfig::Single,
            product_categories: vec![ProductCategory::Basic],
            packaging_materials: vec![PackagingMaterial::new(PackagingMaterialType::InnerBox)],
            ..TypeSelectionData::default()
        };
        assert!(check_type_selection(&selection).is_clean());
    }

    #[test]
    fn test_missing_management_number_needs_confirmation() {
        let form = MarkingFormData::new(
            "구성품",
            TargetType::Component,
            MarkingMethod::Coding,
            MarkingPosition::Bottom,
        );
        let report = check_marking_forms(&[form]);
        assert_eq!(report.confirm_count(), 1);
        assert!(!report.is_blocked());
        assert!(check_marking_forms(&[]).is_clean());
    }

    #[test]
    fn test_implicit_lines_are_reported() {
        let mut form = MarkingFormData::new(
            "구성품",
            TargetType::Component,
            MarkingMethod::Coding,
            MarkingPosition::Bottom,
        );
        form.composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(1),
            has_expiry_date: true,
            ..Default::default()
        };
        let report = check_marking_forms(&[form]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].code, "PK102");
        assert!(report.issues[0].message.ends_with("사용기한"));
    }
}
