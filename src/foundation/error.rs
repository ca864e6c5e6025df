/// Convenience result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Configuration errors are fatal to the call that produced them, never to
/// the process: the failing `register`/`start`/`go_to` returns the error
/// synchronously and every other region, tween and timer keeps running.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Invalid caller-supplied configuration (duplicate region id,
    /// non-positive duration or interval, out-of-range index, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors while parsing or validating a region declaration document.
    #[error("declaration error: {0}")]
    Decl(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Build an [`EngineError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`EngineError::Decl`] value.
    pub fn decl(msg: impl Into<String>) -> Self {
        Self::Decl(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
