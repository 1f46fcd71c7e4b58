//! OAuth 2.0 + PKCE Infrastructure
//!
//! Stateless building blocks for the authorization-code flow with PKCE and
//! refresh-token rotation. Nothing in this module remembers a challenge
//! between calls: the caller persists the verifier and state itself, because
//! the authorize and callback steps run in separate invocations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ OAuthClientTrait │  Seam used by the flow controller
//! └────────┬─────────┘
//!          │
//!          ├──► OAuthClient     (HTTP token endpoint calls)
//!          │
//!          └──► PKCE utilities  (verifier, challenge, state)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use launchbot_common::auth::{OAuthClient, OAuthConfig, PKCEChallenge};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OAuthConfig::twitter(
//!     "client_id".to_string(),
//!     Some("client_secret".to_string()),
//!     "https://bot.example.com/callback".to_string(),
//! );
//! let client = OAuthClient::new(config);
//!
//! let challenge = PKCEChallenge::generate();
//! let url = client.authorization_url(&challenge);
//! // Persist challenge.state + challenge.code_verifier, redirect to `url`,
//! // then on callback:
//! let tokens = client.exchange_code_for_tokens("code", &challenge.code_verifier).await?;
//! # let _ = (url, tokens);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod pkce;
pub mod traits;
pub mod types;

pub use client::{OAuthClient, OAuthClientError};
pub use pkce::PKCEChallenge;
pub use traits::OAuthClientTrait;
pub use types::{OAuthConfig, OAuthErrorResponse, TokenResponse, TokenSet};
