//! MongoDB-backed reading store.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection};
use weatherlens_core::StoreConfig;
use weatherlens_providers::NormalizedReading;

use crate::backend::ReadingStore;
use crate::error::{StoreError, StoreResult};

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Reading store backed by MongoDB
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    /// Connect to MongoDB and verify the server responds.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;
        options.app_name = Some("weatherlens".to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        if !config.username.is_empty() {
            options.credential = Some(
                Credential::builder()
                    .username(config.username.clone())
                    .password(config.password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)
            .map_err(|e| StoreError::connection(e.to_string()))?;

        // The driver connects lazily; ping so a bad address fails at startup
        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        tracing::info!(database = %config.database, "Connected to MongoDB");

        Ok(Self {
            client,
            database: config.database.clone(),
        })
    }

    fn collection(&self, name: &str) -> Collection<NormalizedReading> {
        self.client.database(&self.database).collection(name)
    }
}

#[async_trait]
impl ReadingStore for MongoStore {
    async fn append(&self, collection: &str, reading: &NormalizedReading) -> StoreResult<()> {
        self.collection(collection)
            .insert_one(reading)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        tracing::debug!(collection, "Inserted one reading");
        Ok(())
    }

    async fn append_many(
        &self,
        collection: &str,
        readings: &[NormalizedReading],
    ) -> StoreResult<()> {
        if readings.is_empty() {
            return Ok(());
        }

        self.collection(collection)
            .insert_many(readings)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        tracing::debug!(collection, count = readings.len(), "Inserted readings");
        Ok(())
    }

    async fn find_ordered_by_timestamp(
        &self,
        collection: &str,
    ) -> StoreResult<Vec<NormalizedReading>> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .sort(doc! { "timestamp": 1 })
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::query(e.to_string()))
    }
}
