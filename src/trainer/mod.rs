//! The trainer: answers one customer question end to end.
//!
//! For each question, in order:
//!
//! 1. admission through the [`RateLimiter`] (a rejection stops here)
//! 2. [`ResponseCache`] lookup (a hit is returned as is, having already
//!    consumed one unit of quota)
//! 3. credential check
//! 4. prompt assembly from the [`KnowledgeBase`]
//! 5. one [`TextGenerator`] call, never retried
//! 6. successful answers are cached under the original question
//!
//! [`TrainerService::answer`] folds every failure into a display string;
//! [`TrainerService::try_answer`] exposes the typed outcome.

mod builder;

pub use builder::TrainerBuilder;

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::knowledge::KnowledgeBase;
use crate::limiter::RateLimiter;
use crate::providers::TextGenerator;
use crate::{ErrorKind, FitzoneError, Result, telemetry};

/// A successful reply and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// `true` when served from the response cache without an upstream call.
    pub cached: bool,
}

/// Rate-limited, cached question answering over a [`TextGenerator`].
///
/// Limiter and cache are internally synchronized, so one service can be
/// shared behind an `Arc` by many sessions; each session passes its own
/// identity and gets its own quota.
pub struct TrainerService {
    limiter: RateLimiter,
    cache: ResponseCache,
    knowledge: KnowledgeBase,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl TrainerService {
    /// Create a new builder for configuring the trainer.
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub(crate) fn new(
        limiter: RateLimiter,
        cache: ResponseCache,
        knowledge: KnowledgeBase,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            limiter,
            cache,
            knowledge,
            generator,
        }
    }

    /// Whether a usable API credential (and so a generator) is present.
    ///
    /// When this is `false` the chat surface should report itself offline.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer `question` for `identity`, always yielding displayable text.
    pub async fn answer(&self, identity: &str, question: &str) -> String {
        match self.try_answer(identity, question).await {
            Ok(answer) => answer.text,
            Err(err) => {
                match err.kind() {
                    ErrorKind::LocalRateLimited => debug!(identity, "question rejected: {err}"),
                    kind => warn!(identity, ?kind, error = %err, "question failed"),
                }
                err.user_message().to_string()
            }
        }
    }

    /// Answer `question` for `identity`, returning the failure cause.
    pub async fn try_answer(&self, identity: &str, question: &str) -> Result<Answer> {
        let result = self.resolve(identity, question).await;
        let outcome = match &result {
            Ok(answer) if answer.cached => "cached",
            Ok(_) => "answered",
            Err(err) => err.kind().as_str(),
        };
        metrics::counter!(telemetry::ANSWERS_TOTAL, "outcome" => outcome).increment(1);
        result
    }

    async fn resolve(&self, identity: &str, question: &str) -> Result<Answer> {
        if !self.limiter.admit(identity) {
            return Err(FitzoneError::LocalRateLimited {
                max_requests: self.limiter.max_requests(),
                window: self.limiter.window(),
            });
        }

        if let Some(text) = self.cache.lookup(question).await {
            debug!(identity, "answered from cache");
            return Ok(Answer { text, cached: true });
        }

        let generator = self.generator.as_ref().ok_or(FitzoneError::Unconfigured)?;
        let prompt = self.knowledge.prompt(question);

        let start = Instant::now();
        let result = generator.generate(&prompt).await;
        Self::record_upstream(start, result.is_ok());

        let text = result?;
        self.cache.store(question, text.clone()).await;
        debug!(identity, provider = generator.name(), "answered upstream");
        Ok(Answer {
            text,
            cached: false,
        })
    }

    fn record_upstream(start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL, "status" => status).increment(1);
        metrics::histogram!(telemetry::UPSTREAM_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
    }
}
