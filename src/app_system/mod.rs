//! Store orchestration, seeding, startup, shutdown and tracing setup.

pub mod mock_store;
pub mod seed;
pub mod telemetry;

pub use mock_store::*;
pub use telemetry::*;
