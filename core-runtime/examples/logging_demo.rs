//! Logging system demonstration
//!
//! Runs a few repository calls against an in-memory provider so the
//! repository spans, validation warnings and outcome events show up in each
//! output format.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format with a custom filter
//! cargo run --example logging_demo -- compact "core_health=trace"
//! ```

use async_trait::async_trait;
use bridge_traits::logging::LogLevel;
use core_health::{
    HealthDataProvider, HealthDataRepository, HealthMetric, HealthResult, HeartRateMeasurement,
};
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;
use tracing::{info, span, Level};

/// Provider returning fixed data.
struct DemoProvider;

#[async_trait]
impl HealthDataProvider for DemoProvider {
    fn platform(&self) -> &'static str {
        "demo"
    }

    async fn request_authorization(&self) -> HealthResult<bool> {
        HealthResult::Success(true)
    }

    async fn fetch_step_count(&self, _start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric> {
        HealthResult::Success(HealthMetric::step_count(8_421.0, end_ms, "demo"))
    }

    async fn fetch_heart_rate(
        &self,
        start_ms: i64,
        _end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        HealthResult::Success(vec![
            HeartRateMeasurement::new(72.0, start_ms + 60_000, "demo"),
            HeartRateMeasurement::new(75.0, start_ms + 120_000, "demo"),
        ])
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true);

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    init_logging(config)?;
    info!(format = ?format, "Logging initialized");

    let repository = HealthDataRepository::new(Arc::new(DemoProvider));

    repository.request_permissions().await;
    repository.get_step_count(0, 86_400_000).await;
    repository.get_heart_rate(0, 3_600_000).await;

    // Rejected before reaching the provider; logged at warn.
    repository.get_step_count(-1, 1_000).await;
    repository.get_heart_rate(5_000, 1_000).await;

    let span = span!(Level::INFO, "host_attach");
    let _enter = span.enter();
    info!(
        device_id = %redact_if_sensitive("device_id", "SM-G991B"),
        owner = %redact_if_sensitive("owner", "user@example.com"),
        "Identifying values are redacted"
    );

    Ok(())
}
