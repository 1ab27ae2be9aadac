//! # HashCash Core
//!
//! Client-side proof-of-work stamps in the HashCash style: moderately
//! expensive to compute, cheap to verify, bound to a resource, a timestamp
//! and a random nonce.
//!
//! ## Wire Format
//!
//! ```text
//! {version}:{difficulty}:{timestamp}:{resource}::{nonce}:{counter}
//! ```
//!
//! The empty field between the double colon is a reserved extension slot.
//! The SHA-256 digest of this string is the proof; a stamp is valid when the
//! lowercase hex digest starts with `difficulty` `'0'` characters.
//!
//! ## Example
//!
//! ```rust
//! use hashcash_core::{FixedClock, FixedNonce, Stamp, mine, verify};
//!
//! let mut stamp = Stamp::new(
//!     "client-42",
//!     2,
//!     10,
//!     &FixedClock(1_700_000_000),
//!     &FixedNonce::new("abcdefghij"),
//! )
//! .unwrap();
//!
//! mine(&mut stamp, Some(1_000_000)).unwrap();
//! assert!(verify(&stamp));
//! println!("{stamp}");
//! ```
//!
//! ## Difficulty Units
//!
//! The canonical unit is one hex digit (a factor of 16 per step).
//! [`DifficultyUnit::Byte`] counts whole zero bytes instead (a factor of 256)
//! and must be selected explicitly on an [`Engine`].

mod digest;
mod engine;
mod error;
mod ffi;
mod params;
mod source;
mod stamp;

pub use digest::{Digest, DifficultyUnit, digest, is_valid, meets_difficulty};
pub use engine::{CancelToken, Engine, MiningReport, mine, verify};
pub use error::{ExhaustedError, MineError, NonceError, ParseStampError};
pub use params::*;
pub use source::{Clock, FixedClock, FixedNonce, NonceSource, SystemClock};
pub use stamp::Stamp;
