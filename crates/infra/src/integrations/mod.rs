//! External service integrations

pub mod twitter;
