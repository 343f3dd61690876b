//! Provider dispatch for the collector.

use crate::error::ProviderError;
use crate::openweather::OpenWeatherClient;
use crate::reading::NormalizedReading;
use crate::yandex::YandexClient;

/// A configured weather provider the collector can poll
pub enum WeatherSource {
    Yandex(YandexClient),
    OpenWeather(OpenWeatherClient),
}

impl WeatherSource {
    /// Short provider name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yandex(_) => "yandex",
            Self::OpenWeather(_) => "openweather",
        }
    }

    /// Fetch and normalize one reading from the underlying provider.
    pub async fn observe(&self) -> Result<NormalizedReading, ProviderError> {
        match self {
            Self::Yandex(client) => client.observe().await,
            Self::OpenWeather(client) => client.observe().await,
        }
    }
}
