//! Reading storage for WeatherLens.
//!
//! MongoDB-backed store used in production, plus an in-memory variant for
//! tests and local development.

pub mod backend;
pub mod error;
pub mod memory;
pub mod mongo;

pub use backend::ReadingStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
