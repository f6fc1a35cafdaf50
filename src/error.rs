//! FitZone error types

use std::time::Duration;

/// Shown when the local sliding-window limiter rejects a question.
pub const RATE_LIMITED_MESSAGE: &str = "⏱️ Please wait a moment before asking another question!";

/// Shown when the generation provider answers with HTTP 429.
pub const UPSTREAM_RATE_LIMITED_MESSAGE: &str = "😅 Oops! Too many questions right now.

**What to do:**
• Wait 60 seconds and try again
• The system has rate limits to prevent overload

Sorry for the inconvenience! 💪";

/// Shown when no usable API key is configured.
pub const UNCONFIGURED_MESSAGE: &str = "❌ System not configured. Please contact administrator.";

/// Shown when the upstream request exceeds its deadline.
pub const TIMEOUT_MESSAGE: &str = "⏰ Request timed out. Please try again!";

/// Shown when the provider answers with a non-success status.
pub const FAILURE_MESSAGE: &str = "❌ Sorry, something went wrong. Please try again in a moment.";

/// Shown for network failures and unreadable responses.
pub const TROUBLE_MESSAGE: &str = "❌ Sorry, I'm having trouble right now. Please try again!";

/// Closed classification of everything that can go wrong while answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected by our own limiter.
    LocalRateLimited,
    /// Rejected by the provider's limiter (HTTP 429).
    UpstreamRateLimited,
    /// No API key, or the placeholder key.
    Unconfigured,
    /// The request deadline elapsed.
    Timeout,
    /// Any other transport, status or decoding failure.
    TransportFailure,
}

impl ErrorKind {
    /// Label used for the `outcome` metric dimension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::LocalRateLimited => "local_rate_limited",
            ErrorKind::UpstreamRateLimited => "upstream_rate_limited",
            ErrorKind::Unconfigured => "unconfigured",
            ErrorKind::Timeout => "timeout",
            ErrorKind::TransportFailure => "transport_failure",
        }
    }
}

/// FitZone error types
#[derive(Debug, thiserror::Error)]
pub enum FitzoneError {
    #[error("local rate limit exceeded ({max_requests} requests per {window:?})")]
    LocalRateLimited { max_requests: usize, window: Duration },

    #[error("rate limited by provider, retry after {retry_after:?}")]
    UpstreamRateLimited { retry_after: Option<Duration> },

    #[error("no API key configured")]
    Unconfigured,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FitzoneError {
    /// Collapse the concrete cause into its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            FitzoneError::LocalRateLimited { .. } => ErrorKind::LocalRateLimited,
            FitzoneError::UpstreamRateLimited { .. } => ErrorKind::UpstreamRateLimited,
            FitzoneError::Unconfigured => ErrorKind::Unconfigured,
            FitzoneError::Timeout(_) => ErrorKind::Timeout,
            FitzoneError::Api { .. }
            | FitzoneError::Http(_)
            | FitzoneError::Json(_)
            | FitzoneError::MalformedResponse(_)
            | FitzoneError::Configuration(_) => ErrorKind::TransportFailure,
        }
    }

    /// Text safe to show in the chat transcript.
    ///
    /// Never includes the underlying cause. A bad status gets a different
    /// apology than a broken connection or body, but both read as generic.
    pub fn user_message(&self) -> &'static str {
        match self {
            FitzoneError::LocalRateLimited { .. } => RATE_LIMITED_MESSAGE,
            FitzoneError::UpstreamRateLimited { .. } => UPSTREAM_RATE_LIMITED_MESSAGE,
            FitzoneError::Unconfigured => UNCONFIGURED_MESSAGE,
            FitzoneError::Timeout(_) => TIMEOUT_MESSAGE,
            FitzoneError::Api { .. } => FAILURE_MESSAGE,
            FitzoneError::Http(_)
            | FitzoneError::Json(_)
            | FitzoneError::MalformedResponse(_)
            | FitzoneError::Configuration(_) => TROUBLE_MESSAGE,
        }
    }
}

/// Result type alias for FitZone operations
pub type Result<T> = std::result::Result<T, FitzoneError>;
