pub mod connectors;
pub mod error;
pub mod mapping;
pub mod metrics;
