//! # LaunchBot Domain
//!
//! Business domain types and models for LaunchBot.
//!
//! This crate contains:
//! - Credential, event and post data types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other LaunchBot crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use constants::*;
pub use errors::*;
pub use types::*;
