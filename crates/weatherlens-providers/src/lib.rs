//! Weather provider clients for WeatherLens.
//!
//! Fetches observations from Yandex Weather (GraphQL) and OpenWeather
//! (REST) and normalizes both into a common reading shape.

pub mod error;
pub mod openweather;
pub mod reading;
pub mod source;
pub mod yandex;

pub use error::ProviderError;
pub use openweather::OpenWeatherClient;
pub use reading::{
    ConditionSummary, Coordinates, MainConditions, NormalizedReading, Precipitation, SunTimes,
    Wind,
};
pub use source::WeatherSource;
pub use yandex::YandexClient;
