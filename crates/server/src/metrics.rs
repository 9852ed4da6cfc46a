use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "garage_operations_total",
        "Vehicle and work operations by outcome",
        &["op", "outcome"]
    )
    .expect("register operations_total")
});

pub fn record(op: &str, outcome: &str) {
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn record_err(op: &str, err: &ServiceError) {
    let outcome = match err {
        ServiceError::Validation(_) => "invalid",
        ServiceError::Conflict(_) => "conflict",
        ServiceError::Db(_) => "error",
    };
    record(op, outcome);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
