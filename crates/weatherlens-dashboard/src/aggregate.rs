//! Turns stored readings into chart-ready series.
//!
//! Readings arrive ordered by timestamp. Each provider becomes one
//! [`ProviderSeries`] of parallel per-metric vectors, so a reading that
//! lacks a metric leaves a gap at its position instead of shifting the
//! rest of the series.

use chrono::DateTime;
use thiserror::Error;
use weatherlens_providers::NormalizedReading;

/// Timestamps are shifted by a fixed offset before display.
pub const DISPLAY_UTC_OFFSET_SECS: i64 = 3 * 60 * 60;

/// Returned when either provider has no stored readings yet.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No weather data available")]
pub struct EmptyDataset;

/// Everything the dashboard page needs, derived from both collections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub openweather: ProviderSeries,
    pub yandex: ProviderSeries,
    pub latest: LatestSummary,
}

/// Per-metric vectors for one provider, all the same length as its
/// reading history. Gaps are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSeries {
    pub timestamps: Vec<String>,
    pub temperature: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub temperature_max: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
    pub wind_speed: Vec<Option<f64>>,
    pub pressure: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
}

impl ProviderSeries {
    fn from_readings(readings: &[NormalizedReading]) -> Self {
        let mut series = Self::default();
        for reading in readings {
            series
                .timestamps
                .push(format_display_timestamp(reading.timestamp));
            series.temperature.push(Some(reading.main.temperature));
            series.temperature_min.push(reading.main.temperature_min);
            series.temperature_max.push(reading.main.temperature_max);
            series
                .visibility
                .push(reading.visibility.or(reading.main.visibility));
            series.wind_speed.push(Some(reading.wind.speed));
            series.pressure.push(Some(reading.main.pressure));
            series.humidity.push(Some(reading.main.humidity));
        }
        series
    }
}

/// The most recent reading from each provider.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSummary {
    pub openweather: LatestReading,
    pub yandex: LatestReading,
}

/// Current conditions from a single provider, as shown in the summary
/// cards above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub temperature: f64,
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub condition: Option<String>,
}

impl LatestReading {
    fn from_reading(reading: &NormalizedReading) -> Self {
        Self {
            temperature: reading.main.temperature,
            visibility: reading.visibility.or(reading.main.visibility),
            wind_speed: reading.wind.speed,
            pressure: reading.main.pressure,
            humidity: reading.main.humidity,
            condition: reading
                .condition
                .clone()
                .or_else(|| reading.weather.as_ref().map(|w| w.main.clone())),
        }
    }
}

/// Build the dashboard dataset from both providers' reading histories.
///
/// Fails with [`EmptyDataset`] if either provider has no readings, so
/// the page never renders half-empty charts.
pub fn aggregate(
    openweather: &[NormalizedReading],
    yandex: &[NormalizedReading],
) -> Result<DashboardData, EmptyDataset> {
    let (Some(latest_openweather), Some(latest_yandex)) = (openweather.last(), yandex.last())
    else {
        return Err(EmptyDataset);
    };

    Ok(DashboardData {
        openweather: ProviderSeries::from_readings(openweather),
        yandex: ProviderSeries::from_readings(yandex),
        latest: LatestSummary {
            openweather: LatestReading::from_reading(latest_openweather),
            yandex: LatestReading::from_reading(latest_yandex),
        },
    })
}

/// Format a Unix timestamp for the chart x-axis, shifted by
/// [`DISPLAY_UTC_OFFSET_SECS`].
pub fn format_display_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp + DISPLAY_UTC_OFFSET_SECS, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}
