//! Plotly chart construction.
//!
//! Each chart is a serializable [`ChartSpec`] whose JSON matches what
//! `Plotly.newPlot` expects for `data` and `layout`. The page embeds
//! the serialized specs directly; no chart state lives client-side.

use serde::Serialize;

use crate::aggregate::{DashboardData, ProviderSeries};

const LINE_WIDTH: f64 = 2.5;
const TITLE_FONT_SIZE: u32 = 20;
const AXIS_TITLE_FONT_SIZE: u32 = 16;

/// One complete Plotly figure: traces plus layout.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A single scatter trace. Gaps render as breaks in the line because
/// `None` serializes to JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub mode: TraceMode,
    pub name: String,
    pub line: LineStyle,
}

impl Trace {
    fn new(x: &[String], y: &[Option<f64>], mode: TraceMode, name: &str) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            mode,
            name: name.to_string(),
            line: LineStyle { width: LINE_WIDTH },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineStyle {
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: ChartTitle,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
}

impl Layout {
    fn for_metric(title: &str, y_title: &str) -> Self {
        Self {
            title: ChartTitle {
                text: title.to_string(),
                font: Font {
                    size: TITLE_FONT_SIZE,
                },
                xanchor: "center",
                x: 0.5,
            },
            xaxis: Axis::titled("Datetime"),
            yaxis: Axis::titled(y_title),
            legend: Legend::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartTitle {
    pub text: String,
    pub font: Font,
    pub xanchor: &'static str,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                text: text.to_string(),
                font: Font {
                    size: AXIS_TITLE_FONT_SIZE,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Font {
    pub size: u32,
}

/// Horizontal legend centered above the plot area.
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub x: f64,
    pub y: f64,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            orientation: "h",
            xanchor: "center",
            yanchor: "top",
            x: 0.5,
            y: 1.15,
        }
    }
}

/// Build the six dashboard charts in display order.
pub fn build_charts(data: &DashboardData) -> Vec<ChartSpec> {
    let openweather = &data.openweather;
    let yandex = &data.yandex;

    vec![
        paired_chart(
            "Temperature",
            "Temperature (°C)",
            TraceMode::LinesMarkers,
            openweather,
            &openweather.temperature,
            "OpenWeather Temperature",
            yandex,
            &yandex.temperature,
            "Yandex Temperature",
        ),
        min_max_chart(openweather),
        paired_chart(
            "Visibility",
            "Visibility (m)",
            TraceMode::Lines,
            openweather,
            &openweather.visibility,
            "OpenWeather Visibility",
            yandex,
            &yandex.visibility,
            "Yandex Visibility",
        ),
        paired_chart(
            "Wind Speed",
            "Speed (m/s)",
            TraceMode::Lines,
            openweather,
            &openweather.wind_speed,
            "OpenWeather Wind Speed",
            yandex,
            &yandex.wind_speed,
            "Yandex Wind Speed",
        ),
        paired_chart(
            "Pressure",
            "Pressure (hPa)",
            TraceMode::LinesMarkers,
            openweather,
            &openweather.pressure,
            "OpenWeather Pressure",
            yandex,
            &yandex.pressure,
            "Yandex Pressure",
        ),
        paired_chart(
            "Humidity",
            "Humidity (%)",
            TraceMode::LinesMarkers,
            openweather,
            &openweather.humidity,
            "OpenWeather Humidity",
            yandex,
            &yandex.humidity,
            "Yandex Humidity",
        ),
    ]
}

fn paired_chart(
    title: &str,
    y_title: &str,
    mode: TraceMode,
    openweather: &ProviderSeries,
    openweather_values: &[Option<f64>],
    openweather_name: &str,
    yandex: &ProviderSeries,
    yandex_values: &[Option<f64>],
    yandex_name: &str,
) -> ChartSpec {
    ChartSpec {
        data: vec![
            Trace::new(
                &openweather.timestamps,
                openweather_values,
                mode,
                openweather_name,
            ),
            Trace::new(&yandex.timestamps, yandex_values, mode, yandex_name),
        ],
        layout: Layout::for_metric(title, y_title),
    }
}

/// Min/max temperatures exist only in OpenWeather readings, so both
/// traces share its timestamps.
fn min_max_chart(openweather: &ProviderSeries) -> ChartSpec {
    ChartSpec {
        data: vec![
            Trace::new(
                &openweather.timestamps,
                &openweather.temperature_min,
                TraceMode::Lines,
                "Min Temperature",
            ),
            Trace::new(
                &openweather.timestamps,
                &openweather.temperature_max,
                TraceMode::Lines,
                "Max Temperature",
            ),
        ],
        layout: Layout::for_metric("OpenWeather Min/Max Temperature", "Temperature (°C)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{LatestReading, LatestSummary};

    fn series(prefix: &str) -> ProviderSeries {
        ProviderSeries {
            timestamps: vec![
                format!("{prefix} 00:00:00"),
                format!("{prefix} 01:00:00"),
            ],
            temperature: vec![Some(20.0), Some(21.0)],
            temperature_min: vec![Some(18.0), None],
            temperature_max: vec![Some(24.0), None],
            visibility: vec![Some(10_000.0), Some(9_000.0)],
            wind_speed: vec![Some(3.0), Some(4.0)],
            pressure: vec![Some(1015.0), Some(1016.0)],
            humidity: vec![Some(60.0), Some(62.0)],
        }
    }

    fn sample_data() -> DashboardData {
        let latest = LatestReading {
            temperature: 21.0,
            visibility: Some(9_000.0),
            wind_speed: 4.0,
            pressure: 1016.0,
            humidity: 62.0,
            condition: Some("Clouds".to_string()),
        };
        DashboardData {
            openweather: series("2026-01-01"),
            yandex: series("2026-01-02"),
            latest: LatestSummary {
                openweather: latest.clone(),
                yandex: latest,
            },
        }
    }

    #[test]
    fn test_builds_six_charts_in_display_order() {
        let charts = build_charts(&sample_data());

        let titles: Vec<&str> = charts
            .iter()
            .map(|c| c.layout.title.text.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Temperature",
                "OpenWeather Min/Max Temperature",
                "Visibility",
                "Wind Speed",
                "Pressure",
                "Humidity",
            ]
        );
    }

    #[test]
    fn test_every_chart_has_two_traces() {
        for chart in build_charts(&sample_data()) {
            assert_eq!(chart.data.len(), 2, "{}", chart.layout.title.text);
        }
    }

    #[test]
    fn test_temperature_chart_traces() {
        let charts = build_charts(&sample_data());
        let temperature = &charts[0];

        assert_eq!(temperature.data[0].name, "OpenWeather Temperature");
        assert_eq!(temperature.data[1].name, "Yandex Temperature");
        assert_eq!(temperature.data[0].mode, TraceMode::LinesMarkers);
        assert_eq!(temperature.layout.yaxis.title.text, "Temperature (°C)");
        assert_eq!(temperature.layout.xaxis.title.text, "Datetime");
    }

    #[test]
    fn test_min_max_chart_uses_openweather_timestamps() {
        let charts = build_charts(&sample_data());
        let min_max = &charts[1];

        assert_eq!(min_max.data[0].name, "Min Temperature");
        assert_eq!(min_max.data[1].name, "Max Temperature");
        assert_eq!(min_max.data[0].x[0], "2026-01-01 00:00:00");
        assert_eq!(min_max.data[1].x[0], "2026-01-01 00:00:00");
        assert_eq!(min_max.data[0].mode, TraceMode::Lines);
    }

    #[test]
    fn test_serializes_to_plotly_shape() {
        let charts = build_charts(&sample_data());
        let value = serde_json::to_value(&charts[0]).unwrap();

        assert_eq!(value["data"][0]["mode"], "lines+markers");
        assert_eq!(value["data"][0]["line"]["width"], 2.5);
        assert_eq!(value["layout"]["title"]["font"]["size"], 20);
        assert_eq!(value["layout"]["title"]["x"], 0.5);
        assert_eq!(value["layout"]["yaxis"]["title"]["font"]["size"], 16);
        assert_eq!(value["layout"]["legend"]["orientation"], "h");
        assert_eq!(value["layout"]["legend"]["y"], 1.15);
    }

    #[test]
    fn test_gaps_serialize_as_null() {
        let charts = build_charts(&sample_data());
        let min_max = serde_json::to_value(&charts[1]).unwrap();

        assert_eq!(min_max["data"][0]["y"][0], 18.0);
        assert!(min_max["data"][0]["y"][1].is_null());
    }
}
