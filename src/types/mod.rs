//! Public types for FitZone

pub mod message;

pub use message::{Role, Turn};
