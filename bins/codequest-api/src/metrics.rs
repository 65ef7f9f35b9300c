// Prometheus metrics for the codequest API

use axum::http::StatusCode;
use axum::response::IntoResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

lazy_static! {
    pub static ref RUNS_TOTAL: IntCounter = register_int_counter!(
        "codequest_runs_total",
        "Verification runs started"
    )
    .expect("failed to register codequest_runs_total");
    pub static ref RUNS_PASSED: IntCounter = register_int_counter!(
        "codequest_runs_passed_total",
        "Verification runs whose verdict passed"
    )
    .expect("failed to register codequest_runs_passed_total");
    pub static ref RUNS_FAILED: IntCounter = register_int_counter!(
        "codequest_runs_failed_total",
        "Verification runs whose verdict failed"
    )
    .expect("failed to register codequest_runs_failed_total");
    pub static ref RUNS_REJECTED: IntCounter = register_int_counter!(
        "codequest_runs_rejected_total",
        "Runs rejected because one was already in flight for the exercise"
    )
    .expect("failed to register codequest_runs_rejected_total");
}

/// GET /metrics - Prometheus exposition format
pub async fn serve_metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {e}"),
        );
    }
    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics were not valid UTF-8: {e}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_register_and_increment() {
        let before = RUNS_TOTAL.get();
        RUNS_TOTAL.inc();
        assert_eq!(RUNS_TOTAL.get(), before + 1);
    }
}
