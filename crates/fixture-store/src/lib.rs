//! Document store abstraction for seeding change-stream fixtures.
//!
//! This crate defines the `DocumentStore` trait that the seeder runs its plan
//! against. `fixture-mongodb` implements it on top of the MongoDB driver, and
//! [`MemoryStore`] implements it in process memory for dry runs and tests.

mod error;
mod filter;
mod memory;
mod namespace;
mod traits;

pub use error::StoreError;
pub use filter::{FieldUpdate, Filter, UpdateOutcome};
pub use memory::MemoryStore;
pub use namespace::Namespace;
pub use traits::DocumentStore;
