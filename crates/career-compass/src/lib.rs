pub mod adapter;
pub mod config;
pub mod decision;
pub mod error;
pub mod session;
pub mod telemetry;
