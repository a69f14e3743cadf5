use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{KarmaError, Result};

/// Seconds since the unix epoch. Signed so that a ban start recorded
/// in the future yields a negative elapsed time instead of wrapping.
/// Stored records may carry fractional seconds; those are floored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSeconds {
    Whole(i64),
    Fractional(f64),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match StoredSeconds::deserialize(deserializer)? {
            StoredSeconds::Whole(secs) => Ok(Timestamp(secs)),
            StoredSeconds::Fractional(secs) if secs.is_finite() => Ok(Timestamp(secs.floor() as i64)),
            StoredSeconds::Fractional(secs) => Err(serde::de::Error::custom(format!(
                "timestamp {} is not a finite number",
                secs
            ))),
        }
    }
}

impl Timestamp {
    pub fn seconds_since(self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Pseudonymous identifier: lowercase hex SHA-256 of the raw identity.
/// The raw string is never kept.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

pub const IDENTITY_HEX_LEN: usize = 64;

impl Identity {
    /// Hash an email, IP, session token etc. into its identity.
    pub fn derive(raw: &str) -> Result<Identity> {
        if raw.is_empty() {
            return Err(KarmaError::InvalidInput("empty identity string".into()));
        }
        let mut h = Sha256::new();
        h.update(raw.as_bytes());
        Ok(Identity(digest_to_hex(&h.finalize())))
    }

    /// Wrap a digest that was derived earlier (e.g. read back from storage).
    pub fn from_hex(hex: &str) -> Result<Identity> {
        let well_formed = hex.len() == IDENTITY_HEX_LEN
            && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(KarmaError::InvalidInput(format!(
                "identity must be {} lowercase hex characters",
                IDENTITY_HEX_LEN
            )));
        }
        Ok(Identity(hex.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = KarmaError;

    fn try_from(hex: String) -> Result<Identity> {
        Identity::from_hex(&hex)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> String {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({}..)", self.short())
    }
}

fn digest_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A star rating in `[1, 5]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Rating> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(KarmaError::InvalidInput(format!(
                "rating {} outside [{}, {}]",
                value, MIN_RATING, MAX_RATING
            )));
        }
        Ok(Rating(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = KarmaError;

    fn try_from(value: u8) -> Result<Rating> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
