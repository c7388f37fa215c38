//! Digest primitives behind the signature contract.
//!
//! Every algorithm maps `(content, secret)` to a lowercase hex string. The
//! legacy `md5` variant hashes `content || secret` and is what existing
//! clients speak; `hmac-sha256` keys the MAC with the secret instead.

use std::str::FromStr;

use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Digest used to compute signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    /// `hex(md5(content || secret))`.
    Md5,
    /// `hex(sha256(content || secret))`.
    Sha256,
    /// `hex(HMAC-SHA256(secret, content))`.
    #[default]
    HmacSha256,
}

impl SignatureAlgorithm {
    /// Compute the hex digest of `content` keyed by `secret`.
    pub fn digest(self, content: &[u8], secret: &[u8]) -> String {
        match self {
            SignatureAlgorithm::Md5 => {
                let mut hasher = Md5::new();
                hasher.update(content);
                hasher.update(secret);
                hex::encode(hasher.finalize())
            }
            SignatureAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(content);
                hasher.update(secret);
                hex::encode(hasher.finalize())
            }
            SignatureAlgorithm::HmacSha256 => {
                let mut mac = <HmacSha256 as Mac>::new_from_slice(secret)
                    .expect("HMAC can accept keys of any length");
                mac.update(content);
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }

    /// Configuration name of the algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureAlgorithm::Md5 => "md5",
            SignatureAlgorithm::Sha256 => "sha256",
            SignatureAlgorithm::HmacSha256 => "hmac-sha256",
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown signature algorithm: {0} (expected md5, sha256 or hmac-sha256)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for SignatureAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(SignatureAlgorithm::Md5),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            "hmac-sha256" => Ok(SignatureAlgorithm::HmacSha256),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
