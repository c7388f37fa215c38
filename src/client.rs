//! Client side of the protocol.
//!
//! Signs the request path into `X-SignedRequest` and checks the server's
//! `X-SignedRequest` response header against the received body.

use axum::http::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

use crate::http::response::signature_header;
use crate::http::{X_SIGNED_REQUEST, X_SIGNED_REQUEST_DEBUG};
use crate::signature::{Signer, VerificationOutcome};

/// Errors returned by [`SignedClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("path must start with '/': {0}")]
    InvalidPath(String),

    #[error("signature is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// Response received through a [`SignedClient`].
#[derive(Debug)]
pub struct SignedResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    /// Result of checking the response's `X-SignedRequest` against its body.
    pub signature: VerificationOutcome,
    /// Value of `X-SignedRequest-Debug`, when the server is in debug mode.
    pub debug: Option<bool>,
}

impl SignedResponse {
    /// True when the response carried a valid signature.
    pub fn is_trusted(&self) -> bool {
        self.signature.is_match()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client that signs requests and verifies responses.
#[derive(Debug, Clone)]
pub struct SignedClient {
    http: reqwest::Client,
    base_url: String,
    signer: Signer,
}

impl SignedClient {
    pub fn new(base_url: impl Into<String>, signer: Signer) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, signer)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, signer: Signer) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer,
        }
    }

    /// Build a signed GET request for `path` (which may include a query).
    ///
    /// The signature covers the path exactly as it goes on the wire:
    /// percent-encoded and including any path prefix of the base URL.
    pub fn prepare_get(&self, path: &str) -> Result<reqwest::Request, ClientError> {
        if !path.starts_with('/') {
            return Err(ClientError::InvalidPath(path.to_string()));
        }

        let mut request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .build()?;
        let signature = self.signer.sign(request.url().path().as_bytes());
        request
            .headers_mut()
            .insert(X_SIGNED_REQUEST, signature_header(&signature)?);
        Ok(request)
    }

    /// Send a signed GET request for `path` (which may include a query).
    pub async fn get(&self, path: &str) -> Result<SignedResponse, ClientError> {
        let request = self.prepare_get(path)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        let supplied = response
            .headers()
            .get(X_SIGNED_REQUEST)
            .map(|v| v.as_bytes().to_vec());
        let debug = response
            .headers()
            .get(X_SIGNED_REQUEST_DEBUG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "true");
        let body = response.bytes().await?.to_vec();

        let outcome = self.signer.verify_bytes(supplied.as_deref(), &body);
        tracing::debug!(path = %path, status = %status, signature = outcome.as_str(), "Received signed response");

        Ok(SignedResponse {
            status,
            body,
            signature: outcome,
            debug,
        })
    }
}
