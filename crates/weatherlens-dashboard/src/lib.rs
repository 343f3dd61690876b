//! Web dashboard for collected weather readings.
//!
//! Pulls both providers' histories from the store, aggregates them
//! into aligned time series and serves Plotly charts plus a latest
//! conditions summary over HTTP.

pub mod aggregate;
pub mod charts;
pub mod render;
pub mod server;

pub use aggregate::{
    aggregate, DashboardData, EmptyDataset, LatestReading, LatestSummary, ProviderSeries,
};
pub use charts::{build_charts, ChartSpec};
pub use server::{routes, serve, DashboardState};
