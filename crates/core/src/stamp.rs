//! The proof-of-work stamp and its canonical serialization

use core::fmt::{self, Write as _};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::digest::{Digest, digest};
use crate::error::{NonceError, ParseStampError};
use crate::params::{FIELD_SEPARATOR, STAMP_VERSION};
use crate::source::{Clock, NonceSource};

/// HashCash stamp
///
/// Everything except `counter` is fixed at construction. The counter is the
/// search variable and is only advanced by the mining engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    version: u32,
    difficulty: u32,
    timestamp: i64,
    resource: String,
    nonce: String,
    counter: u64,
}

impl Stamp {
    /// Create a fresh stamp with `counter = 0`
    ///
    /// The timestamp comes from `clock` and a `nonce_len`-character nonce
    /// from `nonces`.
    pub fn new<C, N>(
        resource: impl Into<String>,
        difficulty: u32,
        nonce_len: usize,
        clock: &C,
        nonces: &N,
    ) -> Result<Self, NonceError>
    where
        C: Clock + ?Sized,
        N: NonceSource + ?Sized,
    {
        Ok(Self {
            version: STAMP_VERSION,
            difficulty,
            timestamp: clock.now(),
            resource: resource.into(),
            nonce: nonces.generate(nonce_len)?,
            counter: 0,
        })
    }

    /// Rebuild a stamp from all of its fields, e.g. one received from a peer
    pub fn from_parts(
        version: u32,
        difficulty: u32,
        timestamp: i64,
        resource: impl Into<String>,
        nonce: impl Into<String>,
        counter: u64,
    ) -> Self {
        Self {
            version,
            difficulty,
            timestamp,
            resource: resource.into(),
            nonce: nonce.into(),
            counter,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Canonical string fed to the hash function
    ///
    /// `{version}:{difficulty}:{timestamp}:{resource}::{nonce}:{counter}`
    pub fn serialize(&self) -> String {
        let mut buf = String::with_capacity(self.canonical_len_hint());
        self.write_canonical(&mut buf);
        buf
    }

    /// Write the canonical string into `buf`, replacing its contents
    pub fn write_canonical(&self, buf: &mut String) {
        self.write_canonical_with(self.counter, buf);
    }

    /// Digest of the current serialization, always recomputed
    pub fn digest(&self) -> Digest {
        digest(self.serialize().as_bytes())
    }

    /// Canonical string with `counter` substituted for the stored one
    pub(crate) fn write_canonical_with(&self, counter: u64, buf: &mut String) {
        buf.clear();
        // Writing into a String cannot fail
        let _ = write!(
            buf,
            "{}:{}:{}:{}::{}:{}",
            self.version, self.difficulty, self.timestamp, self.resource, self.nonce, counter
        );
    }

    pub(crate) fn canonical_len_hint(&self) -> usize {
        // Three numeric fields plus the counter, at most 20 digits each
        self.resource.len() + self.nonce.len() + 4 * 20 + 6
    }

    pub(crate) fn set_counter(&mut self, counter: u64) {
        debug_assert!(counter >= self.counter, "counter must never decrease");
        self.counter = counter;
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}::{}:{}",
            self.version, self.difficulty, self.timestamp, self.resource, self.nonce, self.counter
        )
    }
}

impl FromStr for Stamp {
    type Err = ParseStampError;

    /// Parse the wire format produced by [`Stamp::serialize`]
    ///
    /// The resource may itself contain `:`; the nonce and counter are taken
    /// from the right. Numbers must be written exactly as `Display` writes
    /// them (no sign prefix, no leading zeros), so the text that is hashed on
    /// verification is the text that was received.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut head = s.splitn(4, FIELD_SEPARATOR);
        let version = parse_field(head.next(), "version")?;
        let difficulty = parse_field(head.next(), "difficulty")?;
        let timestamp = parse_field(head.next(), "timestamp")?;
        let rest = head
            .next()
            .ok_or(ParseStampError::MissingField("resource"))?;

        let mut tail = rest.rsplitn(3, FIELD_SEPARATOR);
        let counter = parse_field(tail.next(), "counter")?;
        let nonce = tail.next().ok_or(ParseStampError::MissingField("nonce"))?;
        let resource_and_ext = tail
            .next()
            .ok_or(ParseStampError::MissingField("extension"))?;

        // `{resource}:{extension}` with the extension always empty
        let resource = resource_and_ext
            .strip_suffix(FIELD_SEPARATOR)
            .ok_or(ParseStampError::NonEmptyExtension)?;

        Ok(Self::from_parts(
            version, difficulty, timestamp, resource, nonce, counter,
        ))
    }
}

fn parse_field<T>(raw: Option<&str>, field: &'static str) -> Result<T, ParseStampError>
where
    T: FromStr + fmt::Display,
{
    let raw = raw.ok_or(ParseStampError::MissingField(field))?;
    let value: T = raw.parse().map_err(|_| ParseStampError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    // `+7`, `007` and `-0` parse but would hash differently once re-rendered
    if value.to_string() != raw {
        return Err(ParseStampError::NonCanonical {
            field,
            value: raw.to_string(),
        });
    }

    Ok(value)
}
