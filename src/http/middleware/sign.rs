//! Response signer.
//!
//! Resolves the route's policy on the way in and, on the way out, signs the
//! response body and copies the verifier's debug outcome into a header.

use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{header::InvalidHeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::http::request::{request_id, X_SIGNED_REQUEST};
use crate::http::response::{is_rejected, signature_header, DebugAnnotation, X_SIGNED_REQUEST_DEBUG};
use crate::http::SignedRequestState;
use crate::observability::metrics;

/// Failure to sign a response body.
#[derive(Debug, Error)]
pub enum SignError {
    /// The body could not be read or exceeded the size limit.
    #[error("failed to buffer response body: {0}")]
    Body(#[from] axum::Error),

    #[error("signature is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

pub async fn sign_response(
    State(state): State<Arc<SignedRequestState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let policy = state.policy_for(&request);
    request.extensions_mut().insert(policy);
    let request_id = request_id(&request).to_owned();

    let response = next.run(request).await;
    if is_rejected(&response) {
        return response;
    }

    let debug = response.extensions().get::<DebugAnnotation>().copied();

    let mut response = if policy.sign_enabled {
        match sign_body(&state, response).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Failed to sign response");
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return response;
            }
        }
    } else {
        response
    };

    if let Some(debug) = debug {
        response
            .headers_mut()
            .insert(X_SIGNED_REQUEST_DEBUG, debug.header_value());
    }
    response
}

/// Buffer the body, sign it, and reassemble the response.
async fn sign_body(state: &SignedRequestState, response: Response) -> Result<Response, SignError> {
    let (mut parts, body) = response.into_parts();
    let bytes = body::to_bytes(body, state.max_body_size()).await?;

    let signature = state.signer().sign(&bytes);
    parts.headers.insert(X_SIGNED_REQUEST, signature_header(&signature)?);
    metrics::record_signed_response();

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
