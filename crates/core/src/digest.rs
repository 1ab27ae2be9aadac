//! Stamp digest and difficulty predicate
//!
//! The digest is SHA-256 over the canonical stamp string. Difficulty is
//! checked against the lowercase hex rendering: a stamp of difficulty `d`
//! needs `d` leading `'0'` characters, so each unit costs a factor of 16.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::params::{DIGEST_HEX_LEN, DIGEST_SIZE};

/// What one step of difficulty counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyUnit {
    /// Leading `'0'` characters of the hex digest (x16 per step)
    #[default]
    HexDigit,
    /// Leading zero bytes of the binary digest (x256 per step)
    Byte,
}

impl DifficultyUnit {
    /// Largest difficulty a digest can satisfy in this unit
    pub const fn max_difficulty(self) -> u32 {
        match self {
            DifficultyUnit::HexDigit => DIGEST_HEX_LEN as u32,
            DifficultyUnit::Byte => DIGEST_SIZE as u32,
        }
    }
}

/// 256-bit stamp digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering (two characters per byte)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Number of leading `'0'` characters in the hex rendering
    pub fn leading_zero_hex_digits(&self) -> u32 {
        let mut zeros = 0u32;

        for byte in self.0.iter() {
            if *byte == 0 {
                zeros += 2;
            } else {
                if *byte < 0x10 {
                    zeros += 1;
                }
                break;
            }
        }

        zeros
    }

    /// Number of leading zero bytes
    pub fn leading_zero_bytes(&self) -> u32 {
        self.0.iter().take_while(|b| **b == 0).count() as u32
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// SHA-256 of the serialized stamp
#[inline]
pub fn digest(bytes: &[u8]) -> Digest {
    Digest(Sha256::digest(bytes).into())
}

/// Textual difficulty predicate over a hex digest
///
/// True iff the first `difficulty` characters of `digest_repr` are all `'0'`.
/// A difficulty longer than the representation is never satisfied.
///
/// # Example
///
/// ```rust
/// use hashcash_core::is_valid;
///
/// assert!(is_valid("000f3a", 3));
/// assert!(!is_valid("000f3a", 4));
/// assert!(is_valid("ffff", 0));
/// assert!(!is_valid("00", 3));
/// ```
pub fn is_valid(digest_repr: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    match digest_repr.as_bytes().get(..difficulty) {
        Some(prefix) => prefix.iter().all(|c| *c == b'0'),
        None => false,
    }
}

/// Allocation-free difficulty check used by the mining loop
///
/// For [`DifficultyUnit::HexDigit`] this agrees with
/// `is_valid(&digest.to_hex(), difficulty)`.
#[inline(always)]
pub fn meets_difficulty(digest: &Digest, difficulty: u32, unit: DifficultyUnit) -> bool {
    if difficulty > unit.max_difficulty() {
        return false;
    }

    match unit {
        DifficultyUnit::HexDigit => digest.leading_zero_hex_digits() >= difficulty,
        DifficultyUnit::Byte => digest.leading_zero_bytes() >= difficulty,
    }
}
