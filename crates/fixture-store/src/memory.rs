//! In-memory `DocumentStore` used for dry runs and tests.

use crate::error::StoreError;
use crate::filter::{FieldUpdate, Filter, UpdateOutcome};
use crate::namespace::Namespace;
use crate::traits::DocumentStore;
use bson::{oid::ObjectId, Bson, Document};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default, Clone)]
struct MemoryCollection {
    documents: Vec<Document>,
    pre_and_post_images: bool,
}

/// A document store kept in process memory.
///
/// Collections are created implicitly by the first insert, as in MongoDB.
/// Filters are evaluated against the current contents at the time of the call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<Namespace, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<Namespace, MemoryCollection>>, StoreError> {
        self.collections
            .lock()
            .map_err(|e| StoreError::Backend(format!("memory store lock poisoned: {e}")))
    }

    /// Snapshot every collection with its documents, ordered by namespace.
    pub fn snapshot(&self) -> Result<Vec<(Namespace, Vec<Document>)>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .map(|(ns, collection)| (ns.clone(), collection.documents.clone()))
            .collect())
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn drop_collection(&self, ns: &Namespace) -> Result<(), StoreError> {
        let existed = self.lock()?.remove(ns).is_some();
        debug!("Dropped {} (existed: {})", ns, existed);
        Ok(())
    }

    async fn insert_many(
        &self,
        ns: &Namespace,
        documents: Vec<Document>,
    ) -> Result<u64, StoreError> {
        let mut collections = self.lock()?;
        let collection = collections.entry(ns.clone()).or_default();

        let mut inserted = 0;
        for mut document in documents {
            let id = match document.get("_id") {
                Some(id) => id.clone(),
                None => {
                    let id = Bson::ObjectId(ObjectId::new());
                    document.insert("_id", id.clone());
                    id
                }
            };
            if collection
                .documents
                .iter()
                .any(|existing| existing.get("_id") == Some(&id))
            {
                // Ordered insert: documents before the duplicate stay inserted.
                return Err(StoreError::DuplicateKey {
                    namespace: ns.to_string(),
                    id: id.to_string(),
                });
            }
            collection.documents.push(document);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn enable_pre_and_post_images(&self, ns: &Namespace) -> Result<(), StoreError> {
        let mut collections = self.lock()?;
        let collection = collections.get_mut(ns).ok_or_else(|| StoreError::NotFound {
            namespace: ns.to_string(),
            target: "collection".to_string(),
        })?;
        collection.pre_and_post_images = true;
        Ok(())
    }

    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        update: &FieldUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.lock()?;
        let Some(collection) = collections.get_mut(ns) else {
            return Ok(UpdateOutcome::default());
        };
        match collection.documents.iter_mut().find(|d| filter.matches(d)) {
            Some(document) => {
                let modified = update.apply(document);
                Ok(UpdateOutcome {
                    matched: 1,
                    modified: u64::from(modified),
                })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete_one(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.lock()?;
        let Some(collection) = collections.get_mut(ns) else {
            return Ok(0);
        };
        match collection.documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                collection.documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.lock()?;
        let Some(collection) = collections.get_mut(ns) else {
            return Ok(0);
        };
        let before = collection.documents.len();
        collection.documents.retain(|d| !filter.matches(d));
        Ok((before - collection.documents.len()) as u64)
    }

    async fn find_all(&self, ns: &Namespace) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .lock()?
            .get(ns)
            .map(|collection| collection.documents.clone())
            .unwrap_or_default())
    }

    async fn pre_and_post_images_enabled(&self, ns: &Namespace) -> Result<bool, StoreError> {
        Ok(self
            .lock()?
            .get(ns)
            .is_some_and(|collection| collection.pre_and_post_images))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn people() -> Namespace {
        Namespace::new("test", "people")
    }

    #[tokio::test]
    async fn test_drop_is_idempotent() {
        let store = MemoryStore::new();
        store.drop_collection(&people()).await.unwrap();
        store
            .insert_many(&people(), vec![doc! { "_id": 1 }])
            .await
            .unwrap();
        store.drop_collection(&people()).await.unwrap();
        store.drop_collection(&people()).await.unwrap();
        assert!(store.find_all(&people()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_stops_ordered_insert() {
        let store = MemoryStore::new();
        let err = store
            .insert_many(
                &people(),
                vec![doc! { "_id": 1 }, doc! { "_id": 2 }, doc! { "_id": 1 }, doc! { "_id": 3 }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(store.find_all(&people()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_id_gets_object_id() {
        let store = MemoryStore::new();
        store
            .insert_many(&people(), vec![doc! { "name": "a" }])
            .await
            .unwrap();
        let docs = store.find_all(&people()).await.unwrap();
        assert!(docs[0].get_object_id("_id").is_ok());
    }

    #[tokio::test]
    async fn test_pre_and_post_images_need_collection() {
        let store = MemoryStore::new();
        let err = store.enable_pre_and_post_images(&people()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(!store.pre_and_post_images_enabled(&people()).await.unwrap());

        store
            .insert_many(&people(), vec![doc! { "_id": 1 }])
            .await
            .unwrap();
        store.enable_pre_and_post_images(&people()).await.unwrap();
        assert!(store.pre_and_post_images_enabled(&people()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_counts() {
        let store = MemoryStore::new();
        store
            .insert_many(
                &people(),
                vec![
                    doc! { "_id": 1, "team": "red" },
                    doc! { "_id": 2, "team": "red" },
                    doc! { "_id": 3, "team": "blue" },
                ],
            )
            .await
            .unwrap();

        let outcome = store
            .update_one(
                &people(),
                &Filter::field_equals("team", Bson::String("red".into())),
                &FieldUpdate::set("team", Bson::String("green".into())),
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let outcome = store
            .update_one(&people(), &Filter::id(9), &FieldUpdate::set("team", Bson::Null))
            .await
            .unwrap();
        assert_eq!(outcome.matched, 0);

        assert_eq!(store.delete_one(&people(), &Filter::id(9)).await.unwrap(), 0);
        assert_eq!(
            store
                .delete_many(&people(), &Filter::field_equals("team", Bson::String("red".into())))
                .await
                .unwrap(),
            1
        );
        assert_eq!(store.delete_many(&people(), &Filter::All).await.unwrap(), 2);
        assert_eq!(store.snapshot().unwrap()[0].1.len(), 0);
    }
}
