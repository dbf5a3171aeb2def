use pkspec_model::FormId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("no marking form with id {0}")]
    UnknownMarkingForm(FormId),
    #[error("no label form with id {0}")]
    UnknownLabelForm(FormId),
    #[error("no set component with id {0}")]
    UnknownSetComponent(String),
    #[error("cannot leave type selection: {0} blocking issue(s)")]
    BlockedStep(usize),
}

pub type Result<T> = std::result::Result<T, CoreError>;
