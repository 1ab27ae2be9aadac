//! Clock and nonce capabilities passed into stamp construction

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::NonceError;

/// Source of the stamp timestamp (Unix seconds)
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            // Clock set before 1970
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Source of the random nonce string
///
/// Implementations return exactly `len` characters from
/// [`NONCE_ALPHABET`](crate::NONCE_ALPHABET). Uniqueness is not required:
/// a repeated nonce only affects mining cost.
pub trait NonceSource {
    fn generate(&self, len: usize) -> Result<String, NonceError>;
}

/// Nonce source that always hands out (a prefix of) the same string
///
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce(String);

impl FixedNonce {
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn generate(&self, len: usize) -> Result<String, NonceError> {
        let available = self.0.chars().count();
        if available < len {
            return Err(NonceError::TooShort {
                available,
                requested: len,
            });
        }

        Ok(self.0.chars().take(len).collect())
    }
}
