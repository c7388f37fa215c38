//! Request verifier.
//!
//! Admits requests whose `X-SignedRequest` matches the signature of their
//! path. Anything else is answered with an empty 404 before the handler runs,
//! unless debug mode is on, in which case the request proceeds and the
//! outcome is recorded for the response stage.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::request::{request_id, signed_path, supplied_signature};
use crate::http::response::{rejection, DebugAnnotation};
use crate::http::SignedRequestState;
use crate::observability::metrics;
use crate::policy::SignaturePolicy;

pub async fn verify_request(
    State(state): State<Arc<SignedRequestState>>,
    request: Request,
    next: Next,
) -> Response {
    let policy = request
        .extensions()
        .get::<SignaturePolicy>()
        .copied()
        .unwrap_or_else(|| state.policy_for(&request));

    if !policy.verify_enabled {
        return next.run(request).await;
    }

    let path = signed_path(&request);
    let outcome = state
        .signer()
        .verify_bytes(supplied_signature(request.headers()), path.as_bytes());
    metrics::record_verification(outcome, policy.debug_enabled);

    if policy.debug_enabled {
        tracing::debug!(
            request_id = %request_id(&request),
            path = %path,
            outcome = outcome.as_str(),
            "Signature checked in debug mode"
        );
        let mut response = next.run(request).await;
        response.extensions_mut().insert(DebugAnnotation {
            matched: outcome.is_match(),
        });
        return response;
    }

    if outcome.is_match() {
        tracing::debug!(request_id = %request_id(&request), path = %path, "Signature verified");
        return next.run(request).await;
    }

    tracing::warn!(
        request_id = %request_id(&request),
        path = %path,
        outcome = outcome.as_str(),
        "Rejecting request with invalid signature"
    );
    metrics::record_rejection();
    rejection()
}
