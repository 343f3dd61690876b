//! Collector error types.

use thiserror::Error;
use weatherlens_providers::ProviderError;
use weatherlens_store::StoreError;

/// Failure of a single provider within one collection cycle.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Fetching or normalizing the reading failed.
    #[error("Provider failed: {0}")]
    Provider(#[from] ProviderError),

    /// The reading was fetched but could not be stored.
    #[error("Store failed: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_converts() {
        let err: CollectError = ProviderError::MalformedResponse("bad".to_string()).into();
        assert!(matches!(err, CollectError::Provider(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_store_error_converts() {
        let err: CollectError = StoreError::write("disk full").into();
        assert!(matches!(err, CollectError::Store(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
