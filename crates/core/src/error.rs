//! Error types for stamp mining and parsing

use thiserror::Error;

/// Mining ran out of budget without finding a valid counter.
///
/// Recoverable: retry with a larger budget, a fresh nonce or a lower
/// difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("max iterations exceeded: no valid counter up to {last_counter} (budget {budget:?})")]
pub struct ExhaustedError {
    /// Last counter value that was attempted (or the unchanged counter if
    /// none was)
    pub last_counter: u64,
    /// Budget the search ran under (`None` = unbounded)
    pub budget: Option<u64>,
}

/// Failure of a cancellable or parallel mining run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MineError {
    #[error(transparent)]
    Exhausted(#[from] ExhaustedError),

    #[error("mining cancelled at counter {counter}")]
    Cancelled { counter: u64 },
}

/// Errors parsing the stamp wire format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseStampError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} not in canonical form: {value:?}")]
    NonCanonical { field: &'static str, value: String },

    #[error("extension field must be empty")]
    NonEmptyExtension,
}

/// Nonce source failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NonceError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("fixed nonce has {available} characters, {requested} requested")]
    TooShort { available: usize, requested: usize },
}
