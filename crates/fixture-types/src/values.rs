//! Parsing helpers for literal values that BSON cannot express directly in Rust source.

use crate::error::FixtureError;
use base64::{engine::general_purpose, Engine as _};
use bson::{spec::BinarySubtype, Binary, Bson, DateTime as BsonDateTime, Decimal128};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Parse a Decimal128 literal.
///
/// The parsed value must print back as the same literal, otherwise the
/// literal would be stored with a different precision than written.
pub fn decimal(field: &str, literal: &str) -> Result<Bson, FixtureError> {
    let parsed = Decimal128::from_str(literal)
        .map_err(|e| FixtureError::representation(field, literal, format!("{e:?}")))?;
    let printed = parsed.to_string();
    if printed != literal {
        return Err(FixtureError::representation(
            field,
            literal,
            format!("Decimal128 rounds it to {printed}"),
        ));
    }
    Ok(Bson::Decimal128(parsed))
}

/// Parse an RFC 3339 datetime into a BSON DateTime.
///
/// BSON stores milliseconds since the epoch, so digits below the millisecond
/// are truncated the same way the mongo shell's `ISODate` truncates them.
pub fn datetime(field: &str, literal: &str) -> Result<Bson, FixtureError> {
    let parsed = DateTime::parse_from_rfc3339(literal)
        .map_err(|e| FixtureError::representation(field, literal, e))?
        .with_timezone(&Utc);
    Ok(Bson::DateTime(BsonDateTime::from_chrono(parsed)))
}

/// Decode a base64 literal into a generic-subtype binary value.
pub fn binary(field: &str, encoded: &str) -> Result<Bson, FixtureError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| FixtureError::representation(field, encoded, e))?;
    Ok(Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes,
    }))
}
