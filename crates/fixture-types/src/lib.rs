//! Literal fixture documents for MongoDB change-stream tests.
//!
//! This crate builds the BSON documents that the seed plan writes:
//!
//! - [`probe`] - type-probe records, one field per BSON value category
//! - [`association`] - employee/territory link records
//! - [`values`] - parsing helpers for the non-trivial literal values
//! - [`names`] - database and collection names
//!
//! # Example
//!
//! ```ignore
//! use fixture_types::probe::probe_records;
//!
//! let docs = probe_records()?;
//! assert_eq!(docs.len(), 3);
//! ```

pub mod association;
pub mod error;
pub mod names;
pub mod probe;
pub mod values;

pub use association::{association_documents, association_records, AssociationRecord};
pub use error::FixtureError;
pub use probe::{probe_record, probe_records, PROBE_IDS};
