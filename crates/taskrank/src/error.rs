//! Error types for taskrank operations.
//!
//! The scoring path itself never fails; these errors cover the plumbing
//! around it (reading input, loading configuration, validating records).

use crate::validation::FieldError;
use std::io;
use thiserror::Error;

/// The error type for taskrank operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input could not be decoded as JSON.
    #[error("Invalid tasks payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more task records failed validation.
    #[error("{} invalid task field(s): {}", .0.len(), format_field_errors(.0))]
    Validation(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A specialized Result type for taskrank operations.
pub type Result<T> = std::result::Result<T, Error>;
