//! Sends composed text through an authenticated client.

use launchbot_domain::{LaunchBotError, PostReceipt, Result};
use tracing::{error, info};

use super::client::AuthenticatedClient;

/// Publishes exactly one post per call. No retries.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostDispatcher;

impl PostDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Publish `text` and return the provider's response data.
    ///
    /// # Errors
    /// Every failure surfaces as `PostFailed`
    pub async fn dispatch(&self, client: &AuthenticatedClient, text: &str) -> Result<PostReceipt> {
        match client.post(text).await {
            Ok(receipt) => {
                info!(post_id = receipt.id.as_deref().unwrap_or("unknown"), "post published");
                Ok(receipt)
            }
            Err(err) => {
                error!(error = %err, "post rejected by provider");
                Err(match err {
                    LaunchBotError::PostFailed(_) => err,
                    other => LaunchBotError::PostFailed(other.to_string()),
                })
            }
        }
    }
}
