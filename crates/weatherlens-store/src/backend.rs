//! Reading storage trait.
//!
//! This module defines the `ReadingStore` trait that abstracts over storage
//! implementations (MongoDB in production, in-memory for tests).

use async_trait::async_trait;
use weatherlens_providers::NormalizedReading;

use crate::error::StoreResult;

/// Trait for append-only reading storage.
///
/// Readings accumulate one collection per provider; callers name the
/// collection on every call. Nothing is ever updated or deleted through
/// this interface.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Append a single reading to a collection.
    async fn append(&self, collection: &str, reading: &NormalizedReading) -> StoreResult<()>;

    /// Append a batch of readings to a collection.
    ///
    /// An empty batch is a no-op.
    async fn append_many(
        &self,
        collection: &str,
        readings: &[NormalizedReading],
    ) -> StoreResult<()>;

    /// Fetch every reading in a collection, ordered by timestamp ascending.
    ///
    /// An unknown collection yields an empty vector, not an error.
    async fn find_ordered_by_timestamp(
        &self,
        collection: &str,
    ) -> StoreResult<Vec<NormalizedReading>>;
}
