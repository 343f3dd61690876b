//! OpenWeather current-weather provider.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ProviderError;
use crate::reading::{
    ConditionSummary, Coordinates, MainConditions, NormalizedReading, SunTimes, Wind,
};

const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenWeatherClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    city: String,
    units: String,
    lang: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, city: &str, units: &str, lang: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: OPENWEATHER_API_URL.to_string(),
            api_key: api_key.to_string(),
            city: city.to_string(),
            units: units.to_string(),
            lang: lang.to_string(),
        }
    }

    /// Point the client at a different API endpoint.
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

    /// Fetch the raw API response body.
    pub async fn fetch_raw(&self) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("q", self.city.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
                ("appid", self.api_key.as_str()),
            ])
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
}

/// Convert a raw OpenWeather response into a normalized reading.
///
/// The first entry of the `weather` array becomes the condition summary;
/// an empty array is malformed. Visibility is optional and stays absent
/// when the API omits it.
pub fn normalize(raw: Value) -> Result<NormalizedReading, ProviderError> {
    let payload: CityWeather =
        serde_json::from_value(raw).map_err(|e| ProviderError::malformed(e.to_string()))?;

    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::malformed("Weather condition list is empty"))?;

    Ok(NormalizedReading {
        location: Some(payload.name),
        timestamp: payload.dt,
        coordinates: Coordinates {
            latitude: payload.coord.lat,
            longitude: payload.coord.lon,
        },
        main: MainConditions {
            temperature: payload.main.temp,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            feels_like: Some(payload.main.feels_like),
            temperature_min: Some(payload.main.temp_min),
            temperature_max: Some(payload.main.temp_max),
            sea_level: payload.main.sea_level,
            ground_level: payload.main.grnd_level,
            cloudiness: None,
            visibility: None,
        },
        visibility: payload.visibility,
        wind: Wind {
            speed: payload.wind.speed,
            direction: payload.wind.deg,
            gust: payload.wind.gust,
        },
        precipitation: None,
        condition: None,
        clouds: Some(payload.clouds.all),
        sun: Some(SunTimes {
            sunrise: payload.sys.sunrise,
            sunset: payload.sys.sunset,
        }),
        weather: Some(ConditionSummary {
            main: condition.main,
            description: condition.description,
            icon: condition.icon,
        }),
    })
}

#[derive(Debug, Deserialize)]
struct CityWeather {
    name: String,
    dt: i64,
    coord: Coord,
    main: MainBlock,
    visibility: Option<f64>,
    wind: WindBlock,
    clouds: CloudsBlock,
    sys: SysBlock,
    weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
    sea_level: Option<f64>,
    grnd_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    deg: f64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    main: String,
    description: String,
    icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "name": "Sochi",
            "dt": 1_700_000_000,
            "coord": { "lat": 43.6, "lon": 39.73 },
            "main": {
                "temp": 21.4,
                "feels_like": 21.0,
                "temp_min": 19.8,
                "temp_max": 23.1,
                "pressure": 1015,
                "humidity": 62,
                "sea_level": 1015,
                "grnd_level": 1008
            },
            "visibility": 10_000,
            "wind": { "speed": 3.2, "deg": 180, "gust": 5.1 },
            "clouds": { "all": 20 },
            "sys": { "sunrise": 1_699_970_000, "sunset": 1_700_006_000 },
            "weather": [
                { "main": "Clouds", "description": "scattered clouds", "icon": "03d" }
            ]
        })
    }

    #[test]
    fn test_normalize_maps_fields() {
        let reading = normalize(sample_payload()).unwrap();

        assert_eq!(reading.location.as_deref(), Some("Sochi"));
        assert_eq!(reading.timestamp, 1_700_000_000);
        assert_eq!(reading.coordinates.latitude, 43.6);
        assert_eq!(reading.main.temperature, 21.4);
        assert_eq!(reading.main.feels_like, Some(21.0));
        assert_eq!(reading.main.temperature_min, Some(19.8));
        assert_eq!(reading.main.temperature_max, Some(23.1));
        assert_eq!(reading.main.pressure, 1015.0);
        assert_eq!(reading.main.sea_level, Some(1015.0));
        assert_eq!(reading.main.ground_level, Some(1008.0));
        assert_eq!(reading.visibility, Some(10_000.0));
        assert_eq!(reading.wind.speed, 3.2);
        assert_eq!(reading.wind.gust, Some(5.1));
        assert_eq!(reading.clouds, Some(20.0));

        let sun = reading.sun.unwrap();
        assert_eq!(sun.sunrise, 1_699_970_000);
        assert_eq!(sun.sunset, 1_700_006_000);

        let weather = reading.weather.unwrap();
        assert_eq!(weather.main, "Clouds");
        assert_eq!(weather.description, "scattered clouds");
        assert_eq!(weather.icon, "03d");
    }

    #[test]
    fn test_normalize_leaves_foreign_fields_absent() {
        let reading = normalize(sample_payload()).unwrap();

        // Yandex-only fields stay absent on OpenWeather readings
        assert!(reading.main.cloudiness.is_none());
        assert!(reading.main.visibility.is_none());
        assert!(reading.precipitation.is_none());
        assert!(reading.condition.is_none());
    }

    #[test]
    fn test_missing_visibility_stays_absent() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("visibility");

        let reading = normalize(payload).unwrap();
        assert!(reading.visibility.is_none());
        assert!(reading.main.visibility.is_none());
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let mut payload = sample_payload();
        payload["main"].as_object_mut().unwrap().remove("humidity");

        let err = normalize(payload).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_weather_list_is_malformed() {
        let mut payload = sample_payload();
        payload["weather"] = json!([]);

        let err = normalize(payload).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_gust_stays_absent() {
        let mut payload = sample_payload();
        payload["wind"].as_object_mut().unwrap().remove("gust");

        let reading = normalize(payload).unwrap();
        assert!(reading.wind.gust.is_none());
    }
}
