//! X/Twitter v2 API integration
//!
//! Implements the core `PostingProvider` port over three endpoints:
//! - `GET /2/users/me` for the authorized identity
//! - `GET /2/users/{id}/tweets` for recent original posts
//! - `POST /2/tweets` to publish
//!
//! All calls authenticate with the user-context bearer token obtained by the
//! OAuth flow. Every call is sent once through [`crate::http::HttpClient`].

pub mod client;
pub mod types;

pub use client::{TwitterApiClient, TWITTER_API_URL};
pub use types::{ApiProblem, CreatePostRequest, DataEnvelope, PostData, UserData};
