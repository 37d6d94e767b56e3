// src/error.rs
//! Engine error taxonomy.
//!
//! Every failure is scoped to a single request; nothing here is fatal to
//! the process. The engine performs no retries itself — its operations are
//! pure computations or single point reads/writes, so retry policy belongs
//! to the caller around the store.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced user or article absent at call time.
    #[error("not found: {0}")]
    NotFound(String),

    /// Article body could not be normalized into any terms.
    #[error("unprocessable content: {0}")]
    Content(String),

    /// Keyword extraction exceeded the caller's budget.
    #[error("extraction timed out after {0} ms")]
    Timeout(u64),

    /// Store-level failure surfaced unmodified.
    #[error("store error: {0}")]
    Store(String),
}

impl EngineError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn content(why: impl Into<String>) -> Self {
        Self::Content(why.into())
    }
}
