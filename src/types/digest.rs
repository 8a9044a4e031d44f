// ABOUTME: Content-addressable manifest digest parsing and validation.
// ABOUTME: Accepts "sha256:<hex>" or a bare 64-character hex checksum.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const SHA256_PREFIX: &str = "sha256:";
const SHA256_HEX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDigestError {
    #[error("digest cannot be empty")]
    Empty,

    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("sha256 digest must be {SHA256_HEX_LEN} hex characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid character in digest: '{0}'")]
    InvalidChar(char),
}

/// A sha256 manifest digest, normalized to lowercase `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    pub fn parse(input: &str) -> Result<Self, ParseDigestError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseDigestError::Empty);
        }

        let hex = match input.split_once(':') {
            Some(("sha256", hex)) => hex,
            Some((algorithm, _)) => {
                return Err(ParseDigestError::UnsupportedAlgorithm(algorithm.to_string()));
            }
            // Nexus reports asset checksums without the algorithm prefix
            None => input,
        };

        if hex.len() != SHA256_HEX_LEN {
            return Err(ParseDigestError::InvalidLength(hex.len()));
        }

        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseDigestError::InvalidChar(c));
        }

        Ok(Self(format!("{SHA256_PREFIX}{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex portion without the algorithm prefix.
    pub fn hex(&self) -> &str {
        &self.0[SHA256_PREFIX.len()..]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Digest::parse(&value).map_err(serde::de::Error::custom)
    }
}
