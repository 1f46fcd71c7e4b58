//! # LaunchBot API
//!
//! Application layer - HTTP surface and main entry point.
//!
//! This crate contains:
//! - axum routes (authorization flow and announcement triggers)
//! - Application context (dependency injection)
//! - Logging and health helpers for the binary
//!
//! ## Architecture
//! - Depends on `domain`, `common`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod http;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use http::{router, ApiError};
