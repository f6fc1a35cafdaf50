//! Chat transcript for one conversation.
//!
//! A [`ChatSession`] starts with Max's greeting and only ever grows. Turns
//! are rendered in the order they were appended; nothing is edited,
//! removed or deduplicated.

use crate::limiter::DEFAULT_IDENTITY;
use crate::trainer::TrainerService;
use crate::types::{Role, Turn};

/// Opening assistant turn of every session.
pub const GREETING: &str = "Hey! 👋 I'm Max, your fitness assistant!

I can help with:
✅ Membership plans
✅ Class schedules
✅ Gym facilities
✅ Personal training
✅ Fitness advice

What can I help you achieve today? 💪";

/// Append-only conversation between one customer and the trainer.
#[derive(Debug, Clone)]
pub struct ChatSession {
    identity: String,
    turns: Vec<Turn>,
}

impl ChatSession {
    /// Start a session for `identity`; its rate-limit quota is separate
    /// from every other identity's.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            turns: vec![Turn::assistant(GREETING)],
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Every turn so far, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.turns
    }

    /// Record `question`, ask the trainer, record and return the reply.
    ///
    /// The reply is whatever the trainer produced, including its
    /// rate-limit or failure messages.
    pub async fn ask(&mut self, trainer: &TrainerService, question: &str) -> &str {
        self.append(Role::User, question);
        let reply = trainer.answer(&self.identity, question).await;
        self.append(Role::Assistant, reply);
        self.turns
            .last()
            .map(|turn| turn.content.as_str())
            .unwrap_or_default()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY)
    }
}
