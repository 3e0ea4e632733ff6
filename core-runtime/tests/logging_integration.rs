//! Integration tests for logging system
//!
//! `init_logging` installs a global subscriber, so only one test in this
//! binary initializes it; the others exercise configuration and redaction.

use async_trait::async_trait;
use bridge_traits::error::Result as SinkResult;
use bridge_traits::logging::{LogEntry, LogLevel, LoggerSink};
use core_health::{
    HealthDataProvider, HealthDataRepository, HealthMetric, HealthResult, HeartRateMeasurement,
};
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CapturingSink {
    entries: Mutex<Vec<LogEntry>>,
}

#[async_trait]
impl LoggerSink for CapturingSink {
    async fn log(&self, entry: LogEntry) -> SinkResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

struct DeniedProvider;

#[async_trait]
impl HealthDataProvider for DeniedProvider {
    fn platform(&self) -> &'static str {
        "denied"
    }

    async fn request_authorization(&self) -> HealthResult<bool> {
        HealthResult::default_permission_denied()
    }

    async fn fetch_step_count(&self, _start_ms: i64, _end_ms: i64) -> HealthResult<HealthMetric> {
        HealthResult::default_permission_denied()
    }

    async fn fetch_heart_rate(
        &self,
        _start_ms: i64,
        _end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        HealthResult::default_permission_denied()
    }
}

#[test]
fn test_init_logging_forwards_repository_events_to_sink() {
    let sink = Arc::new(CapturingSink::default());
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(sink.clone());

    init_logging(config).expect("first initialization succeeds");

    let repository = HealthDataRepository::new(Arc::new(DeniedProvider));
    futures::executor::block_on(async {
        repository.get_step_count(-1, 10).await;
        repository.get_step_count(0, 10).await;
    });

    let entries = sink.entries.lock().unwrap();

    let rejected = entries
        .iter()
        .find(|entry| entry.level == LogLevel::Warn)
        .expect("validation warning forwarded");
    assert!(rejected.target.starts_with("core_health"));
    assert!(rejected.message.contains("Timestamps cannot be negative"));
    assert_eq!(rejected.span.as_deref(), Some("get_step_count"));

    let outcome = entries
        .iter()
        .find(|entry| entry.fields.get("outcome").map(String::as_str) == Some("PERMISSION_DENIED"))
        .expect("outcome event forwarded");
    assert_eq!(outcome.level, LogLevel::Debug);

    drop(entries);
    let second = init_logging(LoggingConfig::default());
    assert!(second.is_err(), "logging can only be initialized once");
}

#[test]
fn test_logging_config_builder() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_pii_redaction(true)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.redact_pii);
    assert!(config.enable_spans);
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_redaction_of_identifiers() {
    assert_eq!(redact_if_sensitive("refresh_token", "abc"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("device_id", "SM-G991B"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("account", "primary"), "[REDACTED]");
}

#[test]
fn test_redaction_of_emails() {
    let redacted = redact_if_sensitive("owner", "user@example.com");

    assert!(redacted.starts_with('u'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_health_fields_pass_through() {
    assert_eq!(redact_if_sensitive("total", "8421"), "8421");
    assert_eq!(redact_if_sensitive("platform", "android"), "android");
    assert_eq!(redact_if_sensitive("outcome", "DATA_NOT_AVAILABLE"), "DATA_NOT_AVAILABLE");
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_pii_redaction(false)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true)
        .with_filter("core_health=trace");

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.redact_pii);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
    assert_eq!(config.filter.as_deref(), Some("core_health=trace"));
}
