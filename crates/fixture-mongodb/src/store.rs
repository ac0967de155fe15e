//! `DocumentStore` implementation backed by the MongoDB driver.

use crate::args::MongoDBArgs;
use crate::error::{from_mongo, NAMESPACE_NOT_FOUND};
use bson::{doc, Bson, Document};
use fixture_store::{DocumentStore, FieldUpdate, Filter, Namespace, StoreError, UpdateOutcome};
use futures::TryStreamExt;
use mongodb::error::ErrorKind;
use mongodb::{options::ClientOptions, Client, Collection};
use tracing::{debug, info};

/// A MongoDB deployment used as the seed target.
///
/// Pre/post-image capture requires a replica set or sharded cluster running
/// MongoDB 6.0 or newer.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect and ping the deployment.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = MongoStore::connect(&args).await?;
    /// ```
    pub async fn connect(args: &MongoDBArgs) -> Result<Self, StoreError> {
        let admin = Namespace::new("admin", "$cmd");

        let mut options = ClientOptions::parse(args.mongodb_connection_string.as_str())
            .await
            .map_err(|e| from_mongo(&admin, e))?;
        options.connect_timeout = Some(args.connect_timeout);
        options.server_selection_timeout = Some(args.connect_timeout);
        options.app_name = Some("cdc-fixture-seed".to_string());

        let client = Client::with_options(options).map_err(|e| from_mongo(&admin, e))?;

        // Test connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| from_mongo(&admin, e))?;

        info!("Connected to MongoDB");
        Ok(Self::with_client(client))
    }

    /// Create a store from an existing client handle.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, ns: &Namespace) -> Collection<Document> {
        self.client.database(&ns.database).collection(&ns.collection)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    async fn drop_collection(&self, ns: &Namespace) -> Result<(), StoreError> {
        match self.collection(ns).drop().await {
            Ok(()) => Ok(()),
            Err(e) => {
                let missing = matches!(
                    e.kind.as_ref(),
                    ErrorKind::Command(command) if command.code == NAMESPACE_NOT_FOUND
                );
                if missing {
                    debug!("{} did not exist", ns);
                    Ok(())
                } else {
                    Err(from_mongo(ns, e))
                }
            }
        }
    }

    async fn insert_many(
        &self,
        ns: &Namespace,
        documents: Vec<Document>,
    ) -> Result<u64, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection(ns)
            .insert_many(documents)
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn enable_pre_and_post_images(&self, ns: &Namespace) -> Result<(), StoreError> {
        self.client
            .database(&ns.database)
            .run_command(doc! {
                "collMod": ns.collection.as_str(),
                "changeStreamPreAndPostImages": { "enabled": true }
            })
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(())
    }

    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        update: &FieldUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(ns)
            .update_one(filter.to_document(), update.to_document())
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError> {
        let result = self
            .collection(ns)
            .delete_one(filter.to_document())
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, StoreError> {
        let result = self
            .collection(ns)
            .delete_many(filter.to_document())
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(result.deleted_count)
    }

    async fn find_all(&self, ns: &Namespace) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(ns)
            .find(doc! {})
            .await
            .map_err(|e| from_mongo(ns, e))?;
        cursor
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| from_mongo(ns, e))
    }

    async fn pre_and_post_images_enabled(&self, ns: &Namespace) -> Result<bool, StoreError> {
        let response = self
            .client
            .database(&ns.database)
            .run_command(doc! {
                "listCollections": 1,
                "filter": { "name": ns.collection.as_str() }
            })
            .await
            .map_err(|e| from_mongo(ns, e))?;
        Ok(pre_and_post_images_option(&response))
    }
}

/// Read `options.changeStreamPreAndPostImages.enabled` from a `listCollections` reply.
fn pre_and_post_images_option(response: &Document) -> bool {
    response
        .get_document("cursor")
        .ok()
        .and_then(|cursor| cursor.get_array("firstBatch").ok())
        .and_then(|batch| batch.first())
        .and_then(Bson::as_document)
        .and_then(|spec| spec.get_document("options").ok())
        .and_then(|options| options.get_document("changeStreamPreAndPostImages").ok())
        .and_then(|images| images.get_bool("enabled").ok())
        .unwrap_or(false)
}
