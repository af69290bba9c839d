//! Content digests submitted for analysis

use hashscan_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Digest lengths (in hex characters) the provider accepts: MD5, SHA-1, SHA-256
const DIGEST_HEX_LENGTHS: [usize; 3] = [32, 40, 64];

/// An opaque content digest identifying the artifact being checked
///
/// The analyzer never inspects the value; it is only used as a lookup key
/// for the history cache and as the path segment of the remote lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(String);

impl Hash {
    /// Wrap an arbitrary digest string without validation
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a hexadecimal MD5, SHA-1 or SHA-256 digest
    ///
    /// Surrounding whitespace is trimmed and the digest is lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not hexadecimal or does not have the
    /// length of one of the supported digests.
    pub fn parse_digest(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if !DIGEST_HEX_LENGTHS.contains(&trimmed.len()) {
            return Err(ConfigError::InvalidValue {
                field: "hash".to_string(),
                value: format!("{trimmed} (expected 32, 40 or 64 hex characters)"),
            }
            .into());
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidValue {
                field: "hash".to_string(),
                value: format!("{trimmed} (not hexadecimal)"),
            }
            .into());
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_digest(s)
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Hash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Hash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Hash {
    fn from(value: String) -> Self {
        Self(value)
    }
}
