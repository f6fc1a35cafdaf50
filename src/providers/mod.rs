//! Text-generation providers.
//!
//! The trainer talks to providers only through [`TextGenerator`], so tests
//! and alternative backends can stand in for the Gemini client.

pub mod gemini;
pub mod traits;

pub use gemini::{GeminiClient, GenerationConfig};
pub use traits::TextGenerator;
