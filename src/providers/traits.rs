//! Provider trait for prompt-in, text-out generation.

use async_trait::async_trait;

use crate::Result;

/// Turns a fully assembled prompt into generated text.
///
/// Implementations issue at most one upstream request per call and never
/// retry. Failures are reported with the concrete cause so the caller can
/// classify them:
///
/// - HTTP 429 → [`FitzoneError::UpstreamRateLimited`](crate::FitzoneError::UpstreamRateLimited)
/// - other non-success status → [`FitzoneError::Api`](crate::FitzoneError::Api)
/// - deadline elapsed → [`FitzoneError::Timeout`](crate::FitzoneError::Timeout)
/// - connection or body problems → `Http`, `Json` or `MalformedResponse`
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Generate a reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
