//! DocumentStore trait definition.

use crate::error::StoreError;
use crate::filter::{FieldUpdate, Filter, UpdateOutcome};
use crate::namespace::Namespace;
use bson::Document;

/// Trait for the document database a seed plan runs against.
///
/// Every call is awaited before the next one is issued; implementations do
/// not need to handle concurrent use of the same namespace.
///
/// # Usage Pattern
///
/// The seeder is generic over the store:
///
/// ```ignore
/// pub async fn seed<S: DocumentStore>(store: &S) -> Result<()> {
///     store.drop_collection(&ns).await?;
///     store.insert_many(&ns, documents).await?;
/// }
/// ```
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Drop a collection. Succeeds whether or not it exists.
    async fn drop_collection(&self, ns: &Namespace) -> Result<(), StoreError>;

    /// Insert documents in order, returning how many were inserted.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if an `_id` already exists.
    async fn insert_many(&self, ns: &Namespace, documents: Vec<Document>)
        -> Result<u64, StoreError>;

    /// Turn on change-stream pre- and post-image capture for a collection.
    ///
    /// Fails with [`StoreError::NotFound`] if the collection does not exist.
    async fn enable_pre_and_post_images(&self, ns: &Namespace) -> Result<(), StoreError>;

    /// Update the first document selected by `filter`.
    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        update: &FieldUpdate,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the first document selected by `filter`, returning the count deleted.
    async fn delete_one(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError>;

    /// Delete every document selected by `filter`, returning the count deleted.
    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError>;

    /// Read every document of a collection in natural order.
    async fn find_all(&self, ns: &Namespace) -> Result<Vec<Document>, StoreError>;

    /// Whether pre- and post-image capture is enabled. `false` for unknown collections.
    async fn pre_and_post_images_enabled(&self, ns: &Namespace) -> Result<bool, StoreError>;
}
