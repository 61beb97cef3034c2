pub mod routes;
pub mod service;
pub mod tracing;

pub use routes::error::ApiError;
pub use service::{FedemService, ServiceConfig};
