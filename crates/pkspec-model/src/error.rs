use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },
    #[error("unknown {catalog} code: {code}")]
    UnknownCode { catalog: &'static str, code: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
