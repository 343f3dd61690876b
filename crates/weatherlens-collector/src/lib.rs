//! Periodic weather collection for WeatherLens.
//!
//! Polls each configured provider on a fixed interval and appends the
//! normalized readings to per-provider store collections.

pub mod collector;
pub mod error;

pub use collector::{Collector, CollectorSource, CycleReport, SourceOutcome};
pub use error::CollectError;
