//! Common utilities shared across LaunchBot crates.
//!
//! Currently hosts the OAuth 2.0 + PKCE client used to authorize the bot
//! account against the posting provider.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

pub use auth::{
    OAuthClient, OAuthClientError, OAuthClientTrait, OAuthConfig, PKCEChallenge, TokenSet,
};
