//! HTTP surface: authorization endpoints and announcement triggers.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::router;
