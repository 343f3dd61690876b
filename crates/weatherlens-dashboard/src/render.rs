//! HTML rendering for the dashboard pages.
//!
//! Pages are assembled server-side as plain strings. The only script
//! on the dashboard page hands the embedded chart specs to Plotly,
//! loaded from its CDN.

use crate::aggregate::{DashboardData, LatestReading};
use crate::charts;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PAGE_STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #1d232a; }
header { display: flex; align-items: baseline; gap: 1.5rem; padding: 0.75rem 1.5rem; background: #273449; color: #fff; }
header h1 { font-size: 1.25rem; margin: 0; }
nav a { color: #cfd8e3; margin-right: 1rem; text-decoration: none; }
nav a:hover { color: #fff; }
main { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
.summary { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.12); flex: 1; min-width: 280px; }
.card h2 { margin-top: 0; font-size: 1rem; }
.card table { width: 100%; border-collapse: collapse; }
.card th { text-align: left; font-weight: 500; color: #5b6670; padding: 0.25rem 0; }
.card td { text-align: right; }
.chart { background: #fff; border-radius: 8px; margin-top: 1.5rem; padding: 0.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
.notice { font-size: 1.1rem; }
.detail { color: #5b6670; }
";

const PLOT_SCRIPT: &str = "\
for (let i = 0; i < charts.length; i++) {
    Plotly.newPlot(\"chart-\" + i, charts[i].data, charts[i].layout, {responsive: true});
}
";

const ABOUT_BODY: &str = "\
<h2>About</h2>
<p>WeatherLens collects weather observations for a single location from two
independent sources: Yandex Weather and OpenWeather. A background collector
polls both APIs on a fixed schedule and appends each normalized reading to
MongoDB, one collection per provider.</p>
<p>The dashboard charts temperature, min/max temperature, visibility, wind
speed, pressure and humidity over time, with the latest values from both
providers summarized above the charts.</p>
<p>Values are shown in the units each provider reports. Yandex Weather
reports pressure in Pascals while OpenWeather uses hectopascals.</p>
";

/// Render the main dashboard page with summary cards and all charts.
///
/// Fails only if a chart spec does not serialize, which indicates a
/// bug rather than bad data.
pub fn dashboard_page(data: &DashboardData) -> Result<String, serde_json::Error> {
    let charts = charts::build_charts(data);

    let mut body = String::new();
    body.push_str("<section class=\"summary\">\n");
    body.push_str(&summary_card("OpenWeather", &data.latest.openweather));
    body.push_str(&summary_card("Yandex Weather", &data.latest.yandex));
    body.push_str("</section>\n<section class=\"charts\">\n");
    for index in 0..charts.len() {
        body.push_str(&format!(
            "<div id=\"chart-{index}\" class=\"chart\"></div>\n"
        ));
    }
    body.push_str("</section>\n<script>\nconst charts = [\n");
    for chart in &charts {
        body.push_str(&serde_json::to_string(chart)?);
        body.push_str(",\n");
    }
    body.push_str("];\n");
    body.push_str(PLOT_SCRIPT);
    body.push_str("</script>\n");

    Ok(page("WeatherLens", &body))
}

/// Rendered when either provider collection is still empty.
pub fn no_data_page() -> String {
    page(
        "WeatherLens",
        "<p class=\"notice\">No weather data available.</p>\n",
    )
}

/// Rendered when the store cannot be queried.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<p class=\"notice\">Dashboard temporarily unavailable.</p>\n<p class=\"detail\">{}</p>\n",
        html_escape(message)
    );
    page("WeatherLens", &body)
}

pub fn about_page() -> String {
    page("About - WeatherLens", ABOUT_BODY)
}

fn page(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str(&format!("<script src=\"{PLOTLY_CDN}\"></script>\n"));
    html.push_str("<style>");
    html.push_str(PAGE_STYLE);
    html.push_str("</style>\n</head>\n<body>\n<header>\n<h1>WeatherLens</h1>\n");
    html.push_str("<nav><a href=\"/\">Dashboard</a><a href=\"/about\">About</a></nav>\n");
    html.push_str("</header>\n<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn summary_card(title: &str, latest: &LatestReading) -> String {
    let mut card = String::new();
    card.push_str("<div class=\"card\">\n");
    card.push_str(&format!("<h2>{}</h2>\n<table>\n", html_escape(title)));
    card.push_str(&metric_row(
        "Temperature",
        &format_metric(Some(latest.temperature), "°C"),
    ));
    card.push_str(&metric_row(
        "Visibility",
        &format_metric(latest.visibility, "m"),
    ));
    card.push_str(&metric_row(
        "Wind speed",
        &format_metric(Some(latest.wind_speed), "m/s"),
    ));
    card.push_str(&metric_row(
        "Pressure",
        &format_metric(Some(latest.pressure), ""),
    ));
    card.push_str(&metric_row(
        "Humidity",
        &format_metric(Some(latest.humidity), "%"),
    ));
    let condition = match &latest.condition {
        Some(condition) => html_escape(condition),
        None => "&mdash;".to_string(),
    };
    card.push_str(&metric_row("Conditions", &condition));
    card.push_str("</table>\n</div>\n");
    card
}

fn metric_row(label: &str, value: &str) -> String {
    format!("<tr><th>{label}</th><td>{value}</td></tr>\n")
}

fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) if unit.is_empty() => format!("{value}"),
        Some(value) => format!("{value} {unit}"),
        None => "&mdash;".to_string(),
    }
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
