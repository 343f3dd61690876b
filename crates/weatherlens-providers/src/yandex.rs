//! Yandex Weather GraphQL provider.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ProviderError;
use crate::reading::{Coordinates, MainConditions, NormalizedReading, Precipitation, Wind};

const YANDEX_API_URL: &str = "https://api.weather.yandex.ru/graphql/query";
const YANDEX_KEY_HEADER: &str = "X-Yandex-Weather-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct YandexClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    latitude: f64,
    longitude: f64,
}

impl YandexClient {
    pub fn new(api_key: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: YANDEX_API_URL.to_string(),
            api_key: api_key.to_string(),
            latitude,
            longitude,
        }
    }

    /// Point the client at a different GraphQL endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Fetch and normalize the current observation.
    #[instrument(skip(self), level = "info")]
    pub async fn observe(&self) -> Result<NormalizedReading, ProviderError> {
        let raw = self.fetch_raw().await?;
        normalize(raw)
    }

    /// Fetch the raw GraphQL response body.
    pub async fn fetch_raw(&self) -> Result<Value, ProviderError> {
        let body = serde_json::json!({ "query": self.query() });

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header(YANDEX_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::malformed(format!("Response body is not valid JSON: {e}")))
    }

    fn query(&self) -> String {
        format!(
            "{{
  serverTimestamp
  weatherByPoint(request: {{lat: {lat}, lon: {lon}}}) {{
    location {{
      lat
      lon
    }}
    now {{
      cloudiness
      humidity
      precType
      precStrength
      pressure: pressure(unit: PASCAL)
      temperature
      windSpeed
      windDirection
      visibility
      condition
    }}
  }}
}}",
            lat = self.latitude,
            lon = self.longitude,
        )
    }
}

/// Convert a raw Yandex GraphQL response into a normalized reading.
///
/// The server timestamp, not local clock time, becomes the reading's
/// timestamp. Pressure arrives in Pascals and is stored as-is.
pub fn normalize(raw: Value) -> Result<NormalizedReading, ProviderError> {
    let envelope: Envelope =
        serde_json::from_value(raw).map_err(|e| ProviderError::malformed(e.to_string()))?;

    let data = envelope.data;
    let point = data.weather_by_point;
    let now = point.now;

    Ok(NormalizedReading {
        location: None,
        timestamp: data.server_timestamp,
        coordinates: Coordinates {
            latitude: point.location.lat,
            longitude: point.location.lon,
        },
        main: MainConditions {
            temperature: now.temperature,
            humidity: now.humidity,
            pressure: now.pressure,
            feels_like: None,
            temperature_min: None,
            temperature_max: None,
            sea_level: None,
            ground_level: None,
            cloudiness: now.cloudiness,
            visibility: now.visibility,
        },
        visibility: None,
        wind: Wind {
            speed: now.wind_speed,
            direction: now.wind_direction,
            gust: None,
        },
        precipitation: Some(Precipitation {
            kind: now.prec_type,
            strength: now.prec_strength,
        }),
        condition: Some(now.condition),
        clouds: None,
        sun: None,
        weather: None,
    })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: ResponseData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    server_timestamp: i64,
    weather_by_point: WeatherByPoint,
}

#[derive(Debug, Deserialize)]
struct WeatherByPoint {
    location: Point,
    now: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct Point {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentConditions {
    temperature: f64,
    humidity: f64,
    pressure: f64,
    cloudiness: Option<f64>,
    visibility: Option<f64>,
    wind_speed: f64,
    wind_direction: f64,
    prec_type: u32,
    prec_strength: f64,
    condition: String,
}
