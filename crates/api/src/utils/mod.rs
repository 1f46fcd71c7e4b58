//! Process-level helpers for the binary and the HTTP surface.

pub mod health;
pub mod logging;
