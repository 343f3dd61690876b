//! Collector daemon: polls the weather providers once per interval and
//! appends normalized readings to MongoDB.

use anyhow::{Context, Result};
use weatherlens_collector::{Collector, CollectorSource};
use weatherlens_core::Config;
use weatherlens_providers::{OpenWeatherClient, WeatherSource, YandexClient};
use weatherlens_store::MongoStore;

const YANDEX_KEY_ENV: &str = "YANDEX_WEATHER_KEY";
const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    weatherlens_core::init()?;

    let (config, _) = Config::load_validated().context("Failed to load configuration")?;

    let yandex_key = api_key(YANDEX_KEY_ENV);
    let openweather_key = api_key(OPENWEATHER_KEY_ENV);

    let store = MongoStore::connect(&config.store)
        .await
        .context("Failed to connect to MongoDB")?;

    let location = &config.location;
    let sources = vec![
        CollectorSource::new(
            WeatherSource::Yandex(YandexClient::new(
                &yandex_key,
                location.latitude,
                location.longitude,
            )),
            config.store.yandex_collection.clone(),
        ),
        CollectorSource::new(
            WeatherSource::OpenWeather(OpenWeatherClient::new(
                &openweather_key,
                &location.city,
                &location.units,
                &location.lang,
            )),
            config.store.openweather_collection.clone(),
        ),
    ];

    let period = config.collector.period();
    tracing::info!(
        interval_minutes = config.collector.interval_minutes,
        "Weather collector started"
    );

    Collector::new(store, sources, period).run().await;
    Ok(())
}

/// Read an API key from the environment, warning when it is missing.
///
/// A missing key does not abort startup: the affected provider fails per
/// cycle while the other keeps collecting.
fn api_key(var: &str) -> String {
    match std::env::var(var) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!("{var} is not set; requests to this provider will be rejected");
            String::new()
        }
    }
}
