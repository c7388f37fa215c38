//! Metrics collection and exposition.
//!
//! # Metrics
//! - `signed_request_verifications_total` (counter): verifications by outcome and mode
//! - `signed_request_rejections_total` (counter): requests answered with 404
//! - `signed_request_responses_signed_total` (counter): responses carrying a signature

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::signature::VerificationOutcome;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// `outcome` and `mode` label values for a verification.
fn verification_labels(outcome: VerificationOutcome, debug: bool) -> (&'static str, &'static str) {
    let mode = if debug { "debug" } else { "strict" };
    (outcome.as_str(), mode)
}

pub fn record_verification(outcome: VerificationOutcome, debug: bool) {
    let (outcome, mode) = verification_labels(outcome, debug);
    counter!(
        "signed_request_verifications_total",
        "outcome" => outcome,
        "mode" => mode
    )
    .increment(1);
}

pub fn record_rejection() {
    counter!("signed_request_rejections_total").increment(1);
}

pub fn record_signed_response() {
    counter!("signed_request_responses_signed_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_labels() {
        assert_eq!(
            verification_labels(VerificationOutcome::Mismatch, false),
            ("mismatch", "strict")
        );
        assert_eq!(
            verification_labels(VerificationOutcome::Absent, true),
            ("absent", "debug")
        );
    }
}
