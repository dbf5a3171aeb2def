//! Marking preview: turns a composition into the ordered display lines that
//! appear on the form preview and in the final document.

use std::collections::BTreeMap;

use pkspec_model::{
    CosmaxNumberFormat, ExpiryDateFormat, ManagementNumberType, ManufactureDateFormat,
    MarkingComposition, MarkingConcern, MarkingFormData, MarkingSide,
};

use crate::ordering::OrderingMode;

const CLIENT_NUMBER_FALLBACK: &str = "고객사관리번호";
const EXPIRY_FALLBACK: &str = "사용기한";
const MANUFACTURE_FALLBACK: &str = "제조일자";
const OTHER_FALLBACK: &str = "기타";

/// Display text of one concern, regardless of whether it is enabled.
pub fn concern_text(composition: &MarkingComposition, concern: MarkingConcern) -> String {
    match concern {
        MarkingConcern::ManagementNumber => match composition.management_number_type {
            Some(ManagementNumberType::Client) => composition
                .client_number_description
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| CLIENT_NUMBER_FALLBACK.to_string()),
            Some(ManagementNumberType::Cosmax) | None => composition
                .cosmax_number_format
                .unwrap_or(CosmaxNumberFormat::Abc)
                .label()
                .to_string(),
        },
        MarkingConcern::ExpiryDate => {
            match composition
                .expiry_date_format
                .unwrap_or(ExpiryDateFormat::Yyyymmdd)
            {
                ExpiryDateFormat::Other => non_empty_or(
                    composition.expiry_date_custom.as_deref(),
                    EXPIRY_FALLBACK,
                ),
                format => format.label().to_string(),
            }
        }
        MarkingConcern::ManufactureDate => {
            match composition
                .manufacture_date_format
                .unwrap_or(ManufactureDateFormat::YyyymmddMfg)
            {
                ManufactureDateFormat::Other => non_empty_or(
                    composition.manufacture_date_custom.as_deref(),
                    MANUFACTURE_FALLBACK,
                ),
                format => format.label().to_string(),
            }
        }
        MarkingConcern::Other => {
            non_empty_or(composition.other_description.as_deref(), OTHER_FALLBACK)
        }
    }
}

fn non_empty_or(text: Option<&str>, fallback: &str) -> String {
    match text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Render the preview lines of a composition.
///
/// Line mode groups enabled concerns by line number (unset counts as 1),
/// skipping empty lines. Side mode emits at most a front line and a back
/// line (unset counts as back).
pub fn render_lines(composition: &MarkingComposition, mode: OrderingMode) -> Vec<String> {
    match mode {
        OrderingMode::Line => render_by_line(composition),
        OrderingMode::Side => render_by_side(composition),
    }
}

/// Render the preview lines of a marking form, choosing the mode from the
/// form's category, method and position.
pub fn render_form(form: &MarkingFormData) -> Vec<String> {
    render_lines(
        &form.composition,
        OrderingMode::for_tube_engraving(form.is_tube_engraving()),
    )
}

/// Line a concern renders on; unset and 0 both count as line 1.
fn effective_line(composition: &MarkingComposition, concern: MarkingConcern) -> u32 {
    composition
        .line(concern)
        .filter(|line| *line > 0)
        .unwrap_or(1)
}

fn render_by_line(composition: &MarkingComposition) -> Vec<String> {
    let mut lines: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for concern in composition.enabled_concerns() {
        lines
            .entry(effective_line(composition, concern))
            .or_default()
            .push(concern_text(composition, concern));
    }
    lines.into_values().map(|texts| texts.join(" ")).collect()
}

fn render_by_side(composition: &MarkingComposition) -> Vec<String> {
    let mut front = Vec::new();
    let mut back = Vec::new();
    for concern in composition.enabled_concerns() {
        let text = concern_text(composition, concern);
        match composition.side(concern) {
            Some(MarkingSide::Front) => front.push(text),
            Some(MarkingSide::Back) | None => back.push(text),
        }
    }
    let mut lines = Vec::new();
    if !front.is_empty() {
        lines.push(format!("{} : {}", MarkingSide::Front.label(), front.join(" ")));
    }
    if !back.is_empty() {
        lines.push(format!("{} : {}", MarkingSide::Back.label(), back.join(" ")));
    }
    lines
}

/// Enabled concerns without an explicit line (unset or 0), which render on
/// line 1.
pub fn implicit_line_concerns(composition: &MarkingComposition) -> Vec<MarkingConcern> {
    composition
        .enabled_concerns()
        .filter(|concern| !matches!(composition.line(*concern), Some(line) if line > 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mode_orders_by_line() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(2),
            has_expiry_date: true,
            expiry_date_line: Some(1),
            expiry_date_format: Some(ExpiryDateFormat::Yyyymmdd),
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Line),
            vec!["YYYYMMDD까지", "ABC"]
        );
    }

    #[test]
    fn test_side_mode_buckets() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_type: Some(ManagementNumberType::Cosmax),
            cosmax_number_format: Some(CosmaxNumberFormat::Abc),
            management_number_side: Some(MarkingSide::Front),
            has_expiry_date: true,
            expiry_date_format: Some(ExpiryDateFormat::Yyyymmdd),
            expiry_date_side: Some(MarkingSide::Back),
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Side),
            vec!["전면 : ABC", "후면 : YYYYMMDD까지"]
        );
    }

    #[test]
    fn test_shared_line_and_gaps() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_type: Some(ManagementNumberType::Cosmax),
            cosmax_number_format: Some(CosmaxNumberFormat::LotAbc),
            management_number_line: Some(3),
            has_manufacture_date: true,
            manufacture_date_format: Some(ManufactureDateFormat::MfgYyyymmdd),
            manufacture_date_line: Some(3),
            has_other: true,
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Line),
            vec!["기타", "LOT ABC MFG YYYYMMDD제조"]
        );
    }

    #[test]
    fn test_fallback_texts() {
        let composition = MarkingComposition {
            management_number_type: Some(ManagementNumberType::Client),
            client_number_description: Some(String::new()),
            expiry_date_format: Some(ExpiryDateFormat::Other),
            manufacture_date_format: Some(ManufactureDateFormat::Other),
            manufacture_date_custom: Some("MFD 2025".to_string()),
            ..Default::default()
        };
        assert_eq!(
            concern_text(&composition, MarkingConcern::ManagementNumber),
            "고객사관리번호"
        );
        assert_eq!(concern_text(&composition, MarkingConcern::ExpiryDate), "사용기한");
        assert_eq!(
            concern_text(&composition, MarkingConcern::ManufactureDate),
            "MFD 2025"
        );
        assert_eq!(concern_text(&composition, MarkingConcern::Other), "기타");
    }

    #[test]
    fn test_side_mode_unset_goes_back_and_empty_bucket_is_omitted() {
        let composition = MarkingComposition {
            has_other: true,
            other_description: Some("메모".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Side),
            vec!["후면 : 메모"]
        );
    }

    #[test]
    fn test_empty_composition_renders_nothing() {
        let composition = MarkingComposition::default();
        assert!(render_lines(&composition, OrderingMode::Line).is_empty());
        assert!(render_lines(&composition, OrderingMode::Side).is_empty());
    }

    #[test]
    fn test_line_zero_renders_on_first_line() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(0),
            has_expiry_date: true,
            expiry_date_line: Some(2),
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Line),
            vec!["ABC", "YYYYMMDD까지"]
        );
        assert_eq!(
            implicit_line_concerns(&composition),
            vec![MarkingConcern::ManagementNumber]
        );
    }

    #[test]
    fn test_huge_line_number_keeps_order() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(u32::MAX),
            has_other: true,
            other_line: Some(7),
            other_description: Some("메모".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_lines(&composition, OrderingMode::Line),
            vec!["메모", "ABC"]
        );
    }

    #[test]
    fn test_implicit_line_concerns() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(1),
            has_other: true,
            ..Default::default()
        };
        assert_eq!(
            implicit_line_concerns(&composition),
            vec![MarkingConcern::Other]
        );
    }
}
