use thiserror::Error;

/// A convenience `Result` alias using [`DeckError`].
pub type DeckResult<T> = Result<T, DeckError>;

/// Top-level error type for AgentDeck.
///
/// None of these are fatal: a failing operation leaves the dashboard state
/// untouched and the caller decides whether to surface the message.
#[derive(Error, Debug)]
pub enum DeckError {
    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A state transition that would move an entity backwards.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A user-submitted interaction that violates the interaction invariants.
    #[error("Invalid interaction: {0}")]
    InvalidInteraction(String),

    /// A lookup by id that did not resolve.
    #[error("Unknown {kind}: {id}")]
    UnknownEntity {
        /// Entity kind, e.g. `"risk"` or `"agent"`.
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// The background runtime is no longer accepting events.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error (e.g. writing an exported report).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// Shorthand for [`DeckError::UnknownEntity`].
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        DeckError::UnknownEntity {
            kind,
            id: id.into(),
        }
    }
}
