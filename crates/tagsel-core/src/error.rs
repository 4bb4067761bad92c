use thiserror::Error;

use tagsel_model::UnitId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid tag specifier {specifier:?} on unit {unit}: {reason}")]
    InvalidTag {
        unit: UnitId,
        specifier: String,
        reason: String,
    },

    #[error("invalid selection at {token:?}: {reason}")]
    InvalidSelection { token: String, reason: String },

    #[error("unit {unit} declares unknown parent {parent}")]
    UnknownParent { unit: UnitId, parent: UnitId },

    #[error("unit {0} is already declared")]
    DuplicateUnit(UnitId),
}

pub type CoreResult<T> = Result<T, CoreError>;
