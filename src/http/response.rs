//! Response-side helpers.
//!
//! # Responsibilities
//! - Build the rejection response
//! - Carry the verifier's debug outcome to the signer
//! - Attach signature and debug headers
//!
//! # Design Decisions
//! - A rejection is indistinguishable from a missing route: 404, empty body
//! - Verifier-to-signer data travels in response extensions, never globals

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::Response,
};

use crate::signature::Signature;

/// Header carrying the verification outcome in debug mode.
pub const X_SIGNED_REQUEST_DEBUG: HeaderName = HeaderName::from_static("x-signedrequest-debug");

/// Marks a response produced by the verifier's rejection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Verification outcome recorded in debug mode for the response stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugAnnotation {
    pub matched: bool,
}

impl DebugAnnotation {
    pub fn header_value(self) -> HeaderValue {
        HeaderValue::from_static(if self.matched { "true" } else { "false" })
    }
}

/// Empty 404 returned for unsigned or mis-signed requests.
pub fn rejection() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.extensions_mut().insert(Rejected);
    response
}

/// True if the verifier rejected this request.
pub fn is_rejected(response: &Response) -> bool {
    response.extensions().get::<Rejected>().is_some()
}

/// Header value for a signature. Signatures are lowercase hex.
pub fn signature_header(signature: &Signature) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    HeaderValue::from_str(signature.as_str())
}
