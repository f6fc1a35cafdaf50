//! Google Generative Language (`generateContent`) client.
//!
//! See: <https://ai.google.dev/api/generate-content>
//!
//! The API key travels as the `key` query parameter. Each call is a single
//! POST bounded by an explicit per-request timeout; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TextGenerator;
use crate::{FitzoneError, Result};

/// Default base URL for the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for answering gym questions
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default deadline for one generateContent round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Default: 0.8.
    pub temperature: f64,
    /// Default: 600.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_output_tokens: 600,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
    generation: GenerationConfig,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client for the public endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| FitzoneError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Use a different model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the sampling settings.
    pub fn generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Set the per-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send `prompt` and return the first candidate's first text part.
    ///
    /// An empty part is treated as a malformed response.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "sending generateContent");

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.generation,
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Self::check_status(&response)?;

        let raw = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let parsed: GenerateResponse = serde_json::from_str(&raw)?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                FitzoneError::MalformedResponse("no text in first candidate".to_string())
            })
    }

    // The request URL carries the API key, so it is stripped from the cause.
    fn transport_error(&self, err: reqwest::Error) -> FitzoneError {
        let err = err.without_url();
        if err.is_timeout() {
            FitzoneError::Timeout(self.timeout)
        } else {
            FitzoneError::Http(err.to_string())
        }
    }

    /// Check response status and map to the appropriate error.
    fn check_status(response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(());
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(FitzoneError::UpstreamRateLimited { retry_after });
        }

        Err(FitzoneError::Api {
            status: status.as_u16(),
            message: format!("generateContent returned {status}"),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        GeminiClient::generate_content(self, prompt).await
    }
}
