//! Error types surfaced by the stores and the contact form.

use shared::FormFieldError;
use thiserror::Error;

/// Failure while reading or writing persisted store state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted state could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Storage(String),
}

/// Reasons a contact form submission can be refused or fail
#[derive(Debug, Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FormFieldError>),

    #[error(transparent)]
    Store(#[from] StoreError),
}
