//! Credential record persisted between invocations.
//!
//! A single record exists per deployment. It holds either the in-flight OAuth
//! session (`state` + `code_verifier`) or the token pair obtained from the
//! provider, never a validated merge of both.

use serde::{Deserialize, Serialize};

/// Credential lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// Nothing usable stored.
    Unauthenticated,
    /// Authorization started, waiting for the provider callback.
    Authorizing,
    /// Tokens obtained from the authorization-code exchange.
    Authenticated,
    /// Tokens obtained from a refresh-token rotation.
    Refreshed,
}

/// Persisted credential document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialRecord {
    /// Record holding only a pending authorization session.
    pub fn session(state: impl Into<String>, code_verifier: impl Into<String>) -> Self {
        Self {
            code_verifier: Some(code_verifier.into()),
            state: Some(state.into()),
            ..Self::default()
        }
    }

    /// Record holding only a token pair.
    pub fn tokens(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { access_token: Some(access_token.into()), refresh_token, ..Self::default() }
    }

    /// Phase implied by the stored fields.
    ///
    /// A record only ever reports `Authenticated`; `Refreshed` is reported by
    /// the flow controller after a rotation.
    pub fn phase(&self) -> AuthPhase {
        if self.refresh_token.as_deref().is_some_and(|t| !t.is_empty()) {
            AuthPhase::Authenticated
        } else if self.pending_session().is_some() {
            AuthPhase::Authorizing
        } else {
            AuthPhase::Unauthenticated
        }
    }

    /// The one-time OAuth session, if both halves are present.
    pub fn pending_session(&self) -> Option<OAuthSession> {
        match (&self.state, &self.code_verifier) {
            (Some(state), Some(code_verifier)) => {
                Some(OAuthSession { state: state.clone(), code_verifier: code_verifier.clone() })
            }
            _ => None,
        }
    }

    /// Stored refresh token, treating empty strings as absent.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Ephemeral `{state, code_verifier}` pair correlating authorize and callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSession {
    pub state: String,
    pub code_verifier: String,
}

impl From<OAuthSession> for CredentialRecord {
    fn from(session: OAuthSession) -> Self {
        Self::session(session.state, session.code_verifier)
    }
}
