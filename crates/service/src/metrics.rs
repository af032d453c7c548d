use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static INCREMENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hit_counter_increments_total",
        "Sequence increments by outcome",
        &["outcome"]
    )
    .expect("register increments_total")
});

pub static INCREMENT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "hit_counter_increment_duration_seconds",
        "Time spent in the increment transaction",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register increment_duration")
});

pub fn record_outcome(outcome: &str) {
    INCREMENTS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Render the default registry in the text exposition format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
