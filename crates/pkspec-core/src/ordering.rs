//! Ordering-key assignment for newly enabled composition concerns.

use pkspec_model::{CompositionField, MarkingComposition, MarkingConcern, MarkingSide};

/// How the enabled concerns of a composition are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingMode {
    /// Numbered lines, 1-based.
    Line,
    /// Front/back of a tube sealing face.
    Side,
}

impl OrderingMode {
    pub fn for_tube_engraving(is_tube_engraving: bool) -> Self {
        if is_tube_engraving {
            OrderingMode::Side
        } else {
            OrderingMode::Line
        }
    }
}

/// Line for a concern being enabled: one past the other enabled concerns.
pub fn next_line(composition: &MarkingComposition, concern: MarkingConcern) -> u32 {
    let others = composition
        .enabled_concerns()
        .filter(|enabled| *enabled != concern)
        .count();
    u32::try_from(others).unwrap_or(u32::MAX - 1) + 1
}

/// First side not used by another enabled concern; back once both are taken.
pub fn next_side(composition: &MarkingComposition, concern: MarkingConcern) -> MarkingSide {
    let front_taken = composition
        .enabled_concerns()
        .filter(|enabled| *enabled != concern)
        .any(|enabled| composition.side(enabled) == Some(MarkingSide::Front));
    if front_taken {
        MarkingSide::Back
    } else {
        MarkingSide::Front
    }
}

/// Key assignment owed to `concern` once it is enabled, if it has none yet.
///
/// Existing keys are kept, so a concern that is switched off and on again
/// returns to its previous line or side. Line 0 counts as unset.
pub fn key_assignment(
    composition: &MarkingComposition,
    concern: MarkingConcern,
    mode: OrderingMode,
) -> Option<CompositionField> {
    match mode {
        OrderingMode::Line => composition
            .line(concern)
            .is_none_or(|line| line == 0)
            .then(|| CompositionField::line(concern, Some(next_line(composition, concern)))),
        OrderingMode::Side => composition
            .side(concern)
            .is_none()
            .then(|| CompositionField::side(concern, Some(next_side(composition, concern)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_line_counts_other_enabled() {
        let composition = MarkingComposition {
            has_management_number: true,
            has_expiry_date: true,
            ..Default::default()
        };
        assert_eq!(next_line(&composition, MarkingConcern::Other), 3);
        assert_eq!(next_line(&composition, MarkingConcern::ExpiryDate), 2);
        assert_eq!(
            next_line(&MarkingComposition::default(), MarkingConcern::Other),
            1
        );
    }

    #[test]
    fn test_next_side_prefers_front() {
        let mut composition = MarkingComposition::default();
        assert_eq!(
            next_side(&composition, MarkingConcern::ManagementNumber),
            MarkingSide::Front
        );
        composition.has_management_number = true;
        composition.management_number_side = Some(MarkingSide::Front);
        assert_eq!(
            next_side(&composition, MarkingConcern::ExpiryDate),
            MarkingSide::Back
        );
    }

    #[test]
    fn test_existing_key_is_kept() {
        let composition = MarkingComposition {
            expiry_date_line: Some(4),
            ..Default::default()
        };
        assert_eq!(
            key_assignment(&composition, MarkingConcern::ExpiryDate, OrderingMode::Line),
            None
        );
        assert_eq!(
            key_assignment(&composition, MarkingConcern::Other, OrderingMode::Line),
            Some(CompositionField::OtherLine(Some(1)))
        );
    }

    #[test]
    fn test_line_zero_is_reassigned() {
        let composition = MarkingComposition {
            has_management_number: true,
            management_number_line: Some(1),
            expiry_date_line: Some(0),
            ..Default::default()
        };
        assert_eq!(
            key_assignment(&composition, MarkingConcern::ExpiryDate, OrderingMode::Line),
            Some(CompositionField::ExpiryDateLine(Some(2)))
        );
    }
}
