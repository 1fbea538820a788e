pub mod config;
pub mod error;
pub mod orders;
pub mod pricing;
pub mod telemetry;
pub mod text;
