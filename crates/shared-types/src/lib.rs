pub mod envelope;
pub mod error;

pub mod config;

// Field-operations domain modules
pub mod application;
pub mod catalog;
pub mod common;
pub mod job_order;
pub mod location;
pub mod network;
pub mod service_order;
pub mod upload;
pub mod visit;

pub use envelope::*;
pub use error::*;

pub use application::*;
pub use catalog::*;
pub use common::*;
pub use config::*;
pub use job_order::*;
pub use location::*;
pub use network::*;
pub use service_order::*;
pub use upload::*;
pub use visit::*;
