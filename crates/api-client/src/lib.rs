pub mod client;
pub mod config;
pub mod telemetry;

// Endpoint groups, each an `impl ApiClient` block.
mod applications;
mod catalog;
mod job_orders;
mod locations;
mod network;
mod service_orders;

pub use client::ApiClient;
