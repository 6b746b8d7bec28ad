use std::result::Result as StdResult;

use thiserror::Error;

use crate::wizard::forms::FieldErrors;

/// Error type that captures wizard, submission and configuration failures.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Submission is only available on the form step (current step: {0})")]
    NotOnFormStep(&'static str),
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Submission rejected: {0}")]
    Rejected(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<FieldErrors> for WizardError {
    fn from(errors: FieldErrors) -> Self {
        WizardError::Validation(errors)
    }
}

pub type Result<T> = StdResult<T, WizardError>;
