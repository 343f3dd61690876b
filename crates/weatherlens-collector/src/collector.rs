//! Periodic collection of provider readings into the store.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use weatherlens_providers::WeatherSource;
use weatherlens_store::ReadingStore;

use crate::error::CollectError;

/// A provider bound to the collection its readings land in
pub struct CollectorSource {
    pub source: WeatherSource,
    pub collection: String,
}

impl CollectorSource {
    pub fn new(source: WeatherSource, collection: impl Into<String>) -> Self {
        Self {
            source,
            collection: collection.into(),
        }
    }
}

/// Outcome of one provider within a cycle
#[derive(Debug)]
pub struct SourceOutcome {
    pub provider: &'static str,
    pub result: Result<(), CollectError>,
}

/// Outcome of one full collection cycle
#[derive(Debug)]
pub struct CycleReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl CycleReport {
    /// Number of providers whose reading was stored.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of providers that failed this cycle.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Polls every configured source on a fixed period and appends the
/// normalized readings to the store.
pub struct Collector<S> {
    store: S,
    sources: Vec<CollectorSource>,
    period: Duration,
}

impl<S: ReadingStore> Collector<S> {
    pub fn new(store: S, sources: Vec<CollectorSource>, period: Duration) -> Self {
        Self {
            store,
            sources,
            period,
        }
    }

    /// Run collection cycles forever, starting with an immediate cycle.
    ///
    /// A failed provider never aborts the loop; the next cycle retries it.
    /// When a cycle overruns the period, the next one is delayed rather
    /// than fired in a burst.
    pub async fn run(self) {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = self.run_cycle().await;
            tracing::info!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                "Collection cycle complete"
            );
        }
    }

    /// Poll every source once, isolating failures per provider.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for binding in &self.sources {
            let result = self.collect_one(binding).await;
            match &result {
                Ok(()) => {
                    tracing::info!(
                        provider = binding.source.name(),
                        collection = %binding.collection,
                        "Stored reading"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        provider = binding.source.name(),
                        error = %e,
                        "Provider failed this cycle"
                    );
                }
            }
            outcomes.push(SourceOutcome {
                provider: binding.source.name(),
                result,
            });
        }

        CycleReport { outcomes }
    }

    async fn collect_one(&self, binding: &CollectorSource) -> Result<(), CollectError> {
        let reading = binding.source.observe().await?;
        self.store.append(&binding.collection, &reading).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherlens_providers::ProviderError;

    #[test]
    fn test_cycle_report_counts() {
        let report = CycleReport {
            outcomes: vec![
                SourceOutcome {
                    provider: "yandex",
                    result: Ok(()),
                },
                SourceOutcome {
                    provider: "openweather",
                    result: Err(CollectError::Provider(ProviderError::MalformedResponse(
                        "bad".to_string(),
                    ))),
                },
            ],
        };

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = CycleReport {
            outcomes: Vec::new(),
        };
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
    }
}
