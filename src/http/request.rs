//! Request-side helpers.
//!
//! # Responsibilities
//! - Name the inbound signature and request ID headers
//! - Extract the signed path and the client-supplied signature
//!
//! # Design Decisions
//! - The signed content is the path only; the query string is not covered
//! - Nested routers still sign the full original path

use axum::{
    extract::{MatchedPath, OriginalUri, Request},
    http::{HeaderMap, HeaderName},
};

/// Header carrying the client's signature of the request path.
pub const X_SIGNED_REQUEST: HeaderName = HeaderName::from_static("x-signedrequest");

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Raw bytes of the supplied `X-SignedRequest` header, if present.
pub fn supplied_signature(headers: &HeaderMap) -> Option<&[u8]> {
    headers.get(X_SIGNED_REQUEST).map(|value| value.as_bytes())
}

/// Path component the client signed.
pub fn signed_path(request: &Request) -> &str {
    request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path())
        .unwrap_or_else(|| request.uri().path())
}

/// Route template matched by the router, if any.
pub fn matched_route(request: &Request) -> Option<&str> {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
}

/// Request ID assigned by the request ID layer, for log correlation.
pub fn request_id(request: &Request) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
