//! Error types shared by every `DocumentStore` implementation.

use thiserror::Error;

/// Errors that can occur while talking to a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is unreachable or rejected the credentials.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The targeted collection or document does not exist.
    #[error("Not found in {namespace}: {target}")]
    NotFound { namespace: String, target: String },

    /// An inserted document reuses an existing `_id`.
    #[error("Duplicate _id {id} in {namespace}")]
    DuplicateKey { namespace: String, id: String },

    /// A value cannot be stored with the required fidelity.
    #[error("Type representation error: {0}")]
    TypeRepresentation(String),

    /// Any other failure reported by the store.
    #[error("Store error: {0}")]
    Backend(String),
}
