//! MongoDB document store for seeding change-stream fixtures.

pub mod args;
pub mod duration;
pub mod error;
pub mod store;

pub use args::MongoDBArgs;
pub use store::MongoStore;
