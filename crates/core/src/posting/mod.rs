//! Posting: authenticated provider handle and the dispatcher.

pub mod client;
pub mod dispatcher;
pub mod ports;

pub use client::AuthenticatedClient;
pub use dispatcher::PostDispatcher;
