//! Video search capability trait.

use super::VideoCandidate;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// An external video search. Its ranking is taken as-is.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Returns at most `max_results` candidates in provider order.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, SearchProviderError>;
}
