//! Normalized weather observations.
//!
//! Both providers collapse into this shape before storage, so the dashboard
//! can query either collection the same way. Fields a provider does not
//! report stay absent rather than defaulting to zero.

use serde::{Deserialize, Serialize};

/// One weather observation after provider-specific normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    /// Place name, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Provider-assigned observation time, Unix seconds
    pub timestamp: i64,

    pub coordinates: Coordinates,

    pub main: MainConditions,

    /// Visibility in meters, reported at the top level by OpenWeather
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,

    pub wind: Wind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<Precipitation>,

    /// Condition keyword from Yandex, e.g. "clear"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Cloud cover percentage from OpenWeather
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clouds: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun: Option<SunTimes>,

    /// Condition summary block from OpenWeather
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<ConditionSummary>,
}

/// Observation point coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Primary atmospheric measurements
///
/// Pressure is stored exactly as the provider reported it; Yandex sends
/// Pascals while OpenWeather sends hectopascals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_level: Option<f64>,

    /// Cloud cover percentage from Yandex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudiness: Option<f64>,

    /// Visibility in meters, nested here by Yandex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in meters per second
    pub speed: f64,

    /// Direction in degrees
    pub direction: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

/// Precipitation classification from Yandex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "type")]
    pub kind: u32,
    pub strength: f64,
}

/// Sunrise and sunset, Unix seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// OpenWeather condition description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}
