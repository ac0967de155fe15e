//! Mapping of MongoDB driver errors onto `StoreError`.

use fixture_store::{Namespace, StoreError};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

/// Server error code for a missing namespace.
pub const NAMESPACE_NOT_FOUND: i32 = 26;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY: i32 = 11000;

const UNAUTHORIZED: i32 = 13;
const AUTHENTICATION_FAILED: i32 = 18;

/// Classify a server error code returned for an operation on `ns`.
pub fn from_server_code(ns: &Namespace, code: i32, message: &str) -> StoreError {
    match code {
        NAMESPACE_NOT_FOUND => StoreError::NotFound {
            namespace: ns.to_string(),
            target: "collection".to_string(),
        },
        DUPLICATE_KEY => StoreError::DuplicateKey {
            namespace: ns.to_string(),
            id: message.to_string(),
        },
        UNAUTHORIZED | AUTHENTICATION_FAILED => StoreError::Connection(message.to_string()),
        _ => StoreError::Backend(format!("{ns}: {message} (code {code})")),
    }
}

/// Convert a driver error raised by an operation on `ns`.
pub fn from_mongo(ns: &Namespace, err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { message, .. } => StoreError::Connection(message.clone()),
        ErrorKind::Authentication { message, .. } => StoreError::Connection(message.clone()),
        ErrorKind::DnsResolve { message, .. } => StoreError::Connection(message.clone()),
        ErrorKind::Io(io) => StoreError::Connection(io.to_string()),
        ErrorKind::BsonSerialization(e) => StoreError::TypeRepresentation(e.to_string()),
        ErrorKind::Command(command) => from_server_code(ns, command.code, &command.message),
        ErrorKind::Write(WriteFailure::WriteError(write)) => {
            from_server_code(ns, write.code, &write.message)
        }
        ErrorKind::InsertMany(failure) => {
            match failure.write_errors.iter().flatten().next() {
                Some(write) => from_server_code(ns, write.code, &write.message),
                None => StoreError::Backend(format!("{ns}: {err}")),
            }
        }
        _ => StoreError::Backend(format!("{ns}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_codes() {
        let ns = Namespace::new("kestra", "mongo_types");

        match from_server_code(&ns, NAMESPACE_NOT_FOUND, "ns does not exist") {
            StoreError::NotFound { namespace, .. } => assert_eq!(namespace, "kestra.mongo_types"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            from_server_code(&ns, DUPLICATE_KEY, "E11000 duplicate key error"),
            StoreError::DuplicateKey { .. }
        ));
        assert!(matches!(
            from_server_code(&ns, 13, "not authorized on kestra"),
            StoreError::Connection(_)
        ));
        assert!(matches!(
            from_server_code(&ns, 2, "BadValue"),
            StoreError::Backend(_)
        ));
    }
}
