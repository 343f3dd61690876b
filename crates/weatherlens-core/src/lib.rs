//! Core functionality for WeatherLens.
//!
//! Shared configuration and process setup for the collector and
//! dashboard binaries.

pub mod config;

pub use config::{
    CollectorConfig, Config, DashboardConfig, LocationConfig, StoreConfig, ValidationResult,
};

use anyhow::Result;

/// Initialize logging for a WeatherLens process
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("WeatherLens core initialized");
    Ok(())
}
