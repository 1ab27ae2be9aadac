//! HashCash stamp parameters

/// Stamp protocol version
pub const STAMP_VERSION: u32 = 1;

/// SHA-256 output size in bytes
pub const DIGEST_SIZE: usize = 32;

/// Length of the lowercase hex rendering of a digest
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Default nonce length in characters
pub const DEFAULT_NONCE_LEN: usize = 10;

/// Characters a nonce is drawn from
pub const NONCE_ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Iterations between cancellation checks in the mining loop
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Field separator of the wire format
pub const FIELD_SEPARATOR: char = ':';
