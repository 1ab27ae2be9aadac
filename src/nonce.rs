//! Nonce generation from OS entropy

use crate::algorithm::{NonceError, NonceSource, NONCE_ALPHABET};

/// Bytes at or above this value are rejected to keep letters uniform
const REJECT_THRESHOLD: u8 = (256 / NONCE_ALPHABET.len() * NONCE_ALPHABET.len()) as u8;

/// Nonce source backed by `getrandom`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetrandomNonce;

impl NonceSource for GetrandomNonce {
    fn generate(&self, len: usize) -> Result<String, NonceError> {
        let mut nonce = String::with_capacity(len);
        let mut entropy = [0u8; 32];

        while nonce.len() < len {
            getrandom::getrandom(&mut entropy).map_err(|e| NonceError::Entropy(e.to_string()))?;

            for byte in entropy.iter().filter(|b| **b < REJECT_THRESHOLD) {
                if nonce.len() == len {
                    break;
                }
                nonce.push(NONCE_ALPHABET[*byte as usize % NONCE_ALPHABET.len()] as char);
            }
        }

        Ok(nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_multiple_of_alphabet() {
        assert_eq!(REJECT_THRESHOLD, 208);
        assert_eq!(REJECT_THRESHOLD as usize % NONCE_ALPHABET.len(), 0);
    }

    #[test]
    fn test_requested_length_and_alphabet() {
        for len in [0, 1, 10, 64, 200] {
            let nonce = GetrandomNonce.generate(len).unwrap();
            assert_eq!(nonce.len(), len);
            assert!(nonce.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_random_stamp_round_trip() {
        use crate::algorithm::{mine, verify, Stamp, SystemClock};

        let mut stamp = Stamp::new("client-42", 2, 10, &SystemClock, &GetrandomNonce).unwrap();
        mine(&mut stamp, None).unwrap();

        let received: Stamp = stamp.to_string().parse().unwrap();
        assert_eq!(received.nonce().len(), 10);
        assert!(verify(&received));
    }

    #[test]
    fn test_nonces_differ() {
        let a = GetrandomNonce.generate(32).unwrap();
        let b = GetrandomNonce.generate(32).unwrap();
        assert_ne!(a, b);
    }
}
