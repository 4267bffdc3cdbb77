//! Core error definitions and logging bootstrap for AgentDeck.
//!
//! This crate provides the foundational pieces shared across all AgentDeck
//! crates: a unified error enum and the tracing subscriber setup used by the
//! binaries.
//!
//! # Main types
//!
//! - [`DeckError`]: Unified error enum for all AgentDeck subsystems.
//! - [`DeckResult`]: Convenience alias for `Result<T, DeckError>`.
//! - [`logging::LogFormat`]: Output format selected when installing the subscriber.

/// Unified error type.
pub mod error;
/// Tracing subscriber installation.
pub mod logging;

pub use error::{DeckError, DeckResult};
pub use logging::LogFormat;
