use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, GaugeVec, Histogram, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all Mood2Music metrics
const PREFIX: &str = "mood2music";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Mood Metrics
    pub static ref MOODS_DETECTED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_moods_detected_total"), "Detected moods by label and tier"),
        &["mood", "source"]
    ).expect("Failed to create moods_detected_total metric");

    pub static ref CLASSIFICATION_ERRORS_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_classification_errors_total"),
        "Total failed calls to the classification backend"
    ).expect("Failed to create classification_errors_total metric");

    // Recommendation Metrics
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendations by outcome"),
        &["status"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref RECOMMENDED_TRACKS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_recommended_tracks"),
            "Number of tracks per recommendation"
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
    ).expect("Failed to create recommended_tracks metric");

    pub static ref PREVIEW_RESOLUTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(
            format!("{PREFIX}_preview_resolutions_total"),
            "Preview video lookups by outcome"
        ),
        &["outcome"]
    ).expect("Failed to create preview_resolutions_total metric");

    // Catalog Metrics
    pub static ref CATALOG_TRACKS: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_catalog_tracks"), "Tracks in the catalog"),
        &["kind"]
    ).expect("Failed to create catalog_tracks metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(MOODS_DETECTED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFICATION_ERRORS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDED_TRACKS.clone()));
    let _ = REGISTRY.register(Box::new(PREVIEW_RESOLUTIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_TRACKS.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Initialize catalog gauges
pub fn init_catalog_metrics(num_tracks: usize, num_usable_tracks: usize) {
    CATALOG_TRACKS
        .with_label_values(&["all"])
        .set(num_tracks as f64);

    CATALOG_TRACKS
        .with_label_values(&["usable"])
        .set(num_usable_tracks as f64);

    tracing::info!(
        "Catalog metrics initialized: {} tracks, {} usable",
        num_tracks,
        num_usable_tracks
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a detected mood, `source` is the tier that decided it
pub fn record_mood_detected(mood: &str, source: &str) {
    MOODS_DETECTED_TOTAL.with_label_values(&[mood, source]).inc();
}

pub fn record_classification_error() {
    CLASSIFICATION_ERRORS_TOTAL.inc();
}

pub fn record_recommendation(status: &str, num_tracks: usize) {
    RECOMMENDATIONS_TOTAL.with_label_values(&[status]).inc();
    RECOMMENDED_TRACKS.observe(num_tracks as f64);
}

pub fn record_preview_resolution(outcome: &str) {
    PREVIEW_RESOLUTIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            let rss_kb = status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<f64>().ok());
            if let Some(kb) = rss_kb {
                PROCESS_MEMORY_BYTES.set(kb * 1024.0);
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
