//! Builder for configuring trainer instances

use std::sync::Arc;
use std::time::Duration;

use super::TrainerService;
use crate::Result;
use crate::cache::{CacheConfig, ResponseCache};
use crate::config::api_key_is_usable;
use crate::knowledge::KnowledgeBase;
use crate::limiter::{RateLimitConfig, RateLimiter};
use crate::providers::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use crate::providers::{GeminiClient, GenerationConfig, TextGenerator};

/// Builder for [`TrainerService`].
///
/// ```rust
/// # use fitzone::TrainerService;
/// let trainer = TrainerService::builder()
///     .api_key("your-google-api-key")
///     .build()?;
/// assert!(trainer.is_configured());
/// # Ok::<(), fitzone::FitzoneError>(())
/// ```
pub struct TrainerBuilder {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
    generation: GenerationConfig,
    rate_limit: RateLimitConfig,
    cache: CacheConfig,
    knowledge: KnowledgeBase,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            generation: GenerationConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cache: CacheConfig::default(),
            knowledge: KnowledgeBase::default(),
            generator: None,
        }
    }

    /// Configure the Gemini API key.
    ///
    /// Empty and placeholder keys are accepted here but leave the trainer
    /// unconfigured.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the Gemini client at another host (proxies, wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the upstream request deadline (default 20s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    pub fn knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Use a custom generator instead of the Gemini client.
    ///
    /// Takes precedence over [`api_key`](Self::api_key).
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn build(self) -> Result<TrainerService> {
        let generator = match (self.generator, self.api_key) {
            (Some(generator), _) => Some(generator),
            (None, Some(key)) if api_key_is_usable(&key) => {
                let client = GeminiClient::with_base_url(key, self.base_url)?
                    .model(self.model)
                    .timeout(self.timeout)
                    .generation_config(self.generation);
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            (None, _) => None,
        };

        Ok(TrainerService::new(
            RateLimiter::new(&self.rate_limit),
            ResponseCache::new(&self.cache),
            self.knowledge,
            generator,
        ))
    }
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_key_builds_unconfigured() {
        let trainer = TrainerBuilder::new().build().unwrap();
        assert!(!trainer.is_configured());
    }

    #[test]
    fn placeholder_key_builds_unconfigured() {
        let trainer = TrainerBuilder::new()
            .api_key("YOUR_API_KEY_HERE")
            .build()
            .unwrap();
        assert!(!trainer.is_configured());

        let trainer = TrainerBuilder::new().api_key("   ").build().unwrap();
        assert!(!trainer.is_configured());
    }

    #[test]
    fn real_key_builds_configured() {
        let trainer = TrainerBuilder::new().api_key("AIza-test").build().unwrap();
        assert!(trainer.is_configured());
    }
}
