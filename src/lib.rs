//! FitZone - gym assistant over the Gemini `generateContent` API
//!
//! Customer questions go through a per-identity sliding-window rate
//! limiter and a TTL response cache before a prompt (persona + gym
//! knowledge + question) is sent upstream. Every outcome, including
//! failures, comes back as text that is safe to show in a chat transcript.
//!
//! # Example
//!
//! ```rust,no_run
//! use fitzone::{ChatSession, TrainerService};
//!
//! #[tokio::main]
//! async fn main() -> fitzone::Result<()> {
//!     let trainer = TrainerService::builder()
//!         .api_key("your-google-api-key")
//!         .build()?;
//!
//!     let mut session = ChatSession::new("guest-42");
//!     let reply = session.ask(&trainer, "What are your hours?").await;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod limiter;
pub mod providers;
pub mod session;
pub mod telemetry;
pub mod trainer;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, ResponseCache};
pub use error::{ErrorKind, FitzoneError, Result};
pub use knowledge::KnowledgeBase;
pub use limiter::{DEFAULT_IDENTITY, RateLimitConfig, RateLimiter};
pub use providers::{GeminiClient, GenerationConfig, TextGenerator};
pub use session::ChatSession;
pub use trainer::{Answer, TrainerBuilder, TrainerService};
pub use types::{Role, Turn};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
