use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid tag {value:?}: {reason}")]
    InvalidTag { value: String, reason: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;
