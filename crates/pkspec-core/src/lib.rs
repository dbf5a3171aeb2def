//! Packaging specification wizard logic.
//!
//! # Features
//!
//! - **Form generation**: marking and label forms derived from the product
//!   type selection
//! - **Sync propagation**: first-component and first-label edits copied to
//!   untouched siblings
//! - **Ordering keys**: next free line or side for newly enabled concerns
//! - **Preview**: marking lines as printed on the product
//! - **Pre-flight**: presence checks gating step transitions
//! - **Wizard store**: one state object with a method per user action
//!
//! # Architecture
//!
//! ```text
//! pkspec-core/
//! ├── generator   # Selection -> marking/label forms
//! ├── ordering    # Line/side assignment
//! ├── propagate   # Sibling sync with manual-edit flags
//! ├── preview     # Composition -> display lines
//! ├── preflight   # Blocking and confirmation issues
//! └── store       # WizardStore and drafts
//! ```

pub mod error;
pub mod generator;
pub mod ordering;
pub mod preflight;
pub mod preview;
pub mod propagate;
pub mod store;

pub use error::{CoreError, Result};
pub use generator::{
    SET_BOX_NAME, SINGLE_BOX_NAME, SINGLE_COMPONENT_NAME, category_defaults,
    generate_label_forms, generate_marking_forms,
};
pub use ordering::{OrderingMode, key_assignment, next_line, next_side};
pub use preflight::{
    IssueSeverity, PreflightIssue, PreflightReport, check_marking_forms, check_type_selection,
};
pub use preview::{concern_text, implicit_line_concerns, render_form, render_lines};
pub use propagate::{
    EditOrigin, SyncReport, add_custom_label_other, apply_composition_edit,
    apply_custom_items_edit, remove_custom_label_other, select_label_format,
};
pub use store::{DraftState, WizardStep, WizardStore};
