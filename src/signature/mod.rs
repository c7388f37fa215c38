//! Signature primitive shared by the request verifier and response signer.
//!
//! # Data Flow
//! ```text
//! Request path  ─┐
//!                ├─▶ Signer::verify ─▶ VerificationOutcome (Match | Mismatch | Absent)
//! X-SignedRequest┘
//!
//! Response body ───▶ Signer::sign ───▶ Signature ─▶ X-SignedRequest
//! ```
//!
//! # Design Decisions
//! - The secret is fixed at startup and never mutated
//! - Supplied and expected signatures are compared in constant time
//! - A missing header and an empty header are the same outcome (`Absent`)

pub mod algorithm;

use std::fmt;

use subtle::ConstantTimeEq;
use thiserror::Error;

pub use algorithm::{SignatureAlgorithm, UnknownAlgorithm};

/// Errors raised while building signing material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The shared secret was empty.
    #[error("signature secret must not be empty")]
    EmptySecret,
}

/// Shared keying material used in every signature computation.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a non-empty secret.
    pub fn new(secret: impl Into<String>) -> Result<Self, SignatureError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SignatureError::EmptySecret);
        }
        Ok(Self(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Hex digest of some content concatenated with (or keyed by) the secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// The hex string, as carried in `X-SignedRequest`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Classification of a client-supplied signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Supplied signature equals the expected one.
    Match,
    /// A signature was supplied but differs from the expected one.
    Mismatch,
    /// No signature was supplied, or it was empty.
    Absent,
}

impl VerificationOutcome {
    pub fn is_match(self) -> bool {
        matches!(self, VerificationOutcome::Match)
    }

    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationOutcome::Match => "match",
            VerificationOutcome::Mismatch => "mismatch",
            VerificationOutcome::Absent => "absent",
        }
    }
}

/// Computes and checks signatures with a fixed secret and algorithm.
#[derive(Debug, Clone)]
pub struct Signer {
    secret: Secret,
    algorithm: SignatureAlgorithm,
}

impl Signer {
    pub fn new(secret: Secret, algorithm: SignatureAlgorithm) -> Self {
        Self { secret, algorithm }
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Sign `content`. Deterministic for a given secret and algorithm.
    pub fn sign(&self, content: &[u8]) -> Signature {
        Signature(self.algorithm.digest(content, self.secret.as_bytes()))
    }

    /// Compare a supplied signature against the signature of `content`.
    pub fn verify(&self, supplied: Option<&str>, content: &[u8]) -> VerificationOutcome {
        self.verify_bytes(supplied.map(str::as_bytes), content)
    }

    /// Like [`Signer::verify`], for raw header bytes that may not be UTF-8.
    pub fn verify_bytes(&self, supplied: Option<&[u8]>, content: &[u8]) -> VerificationOutcome {
        let supplied = match supplied {
            Some(s) if !s.is_empty() => s,
            _ => return VerificationOutcome::Absent,
        };

        let expected = self.sign(content);
        if supplied.ct_eq(expected.as_str().as_bytes()).into() {
            VerificationOutcome::Match
        } else {
            VerificationOutcome::Mismatch
        }
    }
}
