use crate::model::FieldKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Filter field registered twice: {0}")]
    DuplicateField(String),

    #[error("Value does not fit {kind} field '{field}'")]
    TypeMismatch { field: String, kind: FieldKind },

    #[error("{0}")]
    Validation(String),

    #[error("Record is not part of the current result set: {0}")]
    UnknownRecord(String),

    #[error("Unknown bulk action: {0}")]
    UnknownAction(String),

    #[error("Bulk action '{0}' is not available for the selected items")]
    ActionNotEligible(String),

    #[error("No items selected")]
    EmptySelection,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Type CONFIRM to proceed with this action")]
    ConfirmationIncomplete,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;
