//! HashCash Prover Library
//!
//! Mints and checks HashCash-style proof-of-work stamps: a requester spends
//! a tunable amount of CPU before a resource is granted, and the grantor
//! checks the stamp with a single hash.
//!
//! # Features
//!
//! - **Cheap Verification**: One SHA-256 per check, no stored state
//! - **Tunable Cost**: Each difficulty step multiplies expected work by 16
//! - **Parallel Mining**: Optional rayon search returning the minimal counter
//! - **Injected Randomness**: Clock and nonce sources are explicit
//!
//! # Example
//!
//! ```rust
//! use hashcash::algorithm::{mine, verify, Stamp, SystemClock};
//! use hashcash::GetrandomNonce;
//!
//! let mut stamp = Stamp::new("client-42", 2, 10, &SystemClock, &GetrandomNonce).unwrap();
//! mine(&mut stamp, Some(10_000_000)).unwrap();
//!
//! // Ship `stamp.to_string()` to the verifier, which parses and checks it
//! let received: Stamp = stamp.to_string().parse().unwrap();
//! assert!(verify(&received));
//! ```

// Re-export the core algorithm
pub use hashcash_core as algorithm;

pub mod config;
pub mod logging;
pub mod nonce;

// Convenience re-exports
pub use algorithm::{mine, verify, Engine, Stamp};
pub use nonce::GetrandomNonce;
