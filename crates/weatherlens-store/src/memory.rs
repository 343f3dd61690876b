//! In-memory reading store for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use weatherlens_providers::NormalizedReading;

use crate::backend::ReadingStore;
use crate::error::{StoreError, StoreResult};

/// Reading store held entirely in memory
///
/// Clones share the same underlying map, mirroring how `MongoStore` clones
/// share a connection pool.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<NormalizedReading>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingStore for MemoryStore {
    async fn append(&self, collection: &str, reading: &NormalizedReading) -> StoreResult<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::write("Store mutex poisoned"))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push(reading.clone());
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

        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::write("Store mutex poisoned"))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .extend_from_slice(readings);
        Ok(())
    }

    async fn find_ordered_by_timestamp(
        &self,
        collection: &str,
    ) -> StoreResult<Vec<NormalizedReading>> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::query("Store mutex poisoned"))?;

        let mut readings = collections.get(collection).cloned().unwrap_or_default();
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherlens_providers::{Coordinates, MainConditions, Wind};

    fn reading(timestamp: i64) -> NormalizedReading {
        NormalizedReading {
            location: None,
            timestamp,
            coordinates: Coordinates {
                latitude: 43.6,
                longitude: 39.73,
            },
            main: MainConditions {
                temperature: 20.0,
                humidity: 60.0,
                pressure: 1013.0,
                feels_like: None,
                temperature_min: None,
                temperature_max: None,
                sea_level: None,
                ground_level: None,
                cloudiness: None,
                visibility: None,
            },
            visibility: None,
            wind: Wind {
                speed: 3.0,
                direction: 180.0,
                gust: None,
            },
            precipitation: None,
            condition: None,
            clouds: None,
            sun: None,
            weather: None,
        }
    }

    #[tokio::test]
    async fn test_append_and_find_in_timestamp_order() {
        let store = MemoryStore::new();

        store.append("readings", &reading(300)).await.unwrap();
        store.append("readings", &reading(100)).await.unwrap();
        store.append("readings", &reading(200)).await.unwrap();

        let found = store.find_ordered_by_timestamp("readings").await.unwrap();
        let timestamps: Vec<i64> = found.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![100, 200, 300]);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let found = store.find_ordered_by_timestamp("missing").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();

        store.append("yandex_weather", &reading(1)).await.unwrap();
        store
            .append("openweather_weather", &reading(2))
            .await
            .unwrap();

        let yandex = store
            .find_ordered_by_timestamp("yandex_weather")
            .await
            .unwrap();
        let openweather = store
            .find_ordered_by_timestamp("openweather_weather")
            .await
            .unwrap();

        assert_eq!(yandex.len(), 1);
        assert_eq!(openweather.len(), 1);
        assert_eq!(yandex[0].timestamp, 1);
        assert_eq!(openweather[0].timestamp, 2);
    }

    #[tokio::test]
    async fn test_append_many() {
        let store = MemoryStore::new();

        store
            .append_many("readings", &[reading(2), reading(1)])
            .await
            .unwrap();
        store.append_many("readings", &[]).await.unwrap();

        let found = store.find_ordered_by_timestamp("readings").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].timestamp, 1);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.append("readings", &reading(1)).await.unwrap();

        let found = clone.find_ordered_by_timestamp("readings").await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
