//! Error types for fixture construction.

use thiserror::Error;

/// Errors that can occur while building fixture documents.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// A literal cannot be represented in BSON with the required fidelity.
    #[error("Field '{field}' cannot represent '{literal}': {reason}")]
    TypeRepresentation {
        field: String,
        literal: String,
        reason: String,
    },

    /// A record could not be encoded as a BSON document.
    #[error("BSON encoding error: {0}")]
    Encode(#[from] bson::ser::Error),
}

impl FixtureError {
    pub fn representation(field: &str, literal: &str, reason: impl std::fmt::Display) -> Self {
        FixtureError::TypeRepresentation {
            field: field.to_string(),
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}
