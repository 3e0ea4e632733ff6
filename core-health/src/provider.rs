//! Platform health data provider contract
//!
//! A provider is bound to one platform handle at construction (the Android
//! application context, the iOS health store) and exposes three operations.
//! Implementations own the mapping from native errors and data shapes into
//! [`HealthResult`]; nothing they call may escape as a panic or an error.

use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

use crate::models::{HealthMetric, HeartRateMeasurement};
use crate::result::{ErrorCause, HealthResult};

/// Health data provider trait
///
/// # Contract
///
/// - `request_authorization` returns `Success(true)` only when every required
///   read permission (step count, heart rate) is granted.
/// - `fetch_step_count` reports an empty window as `DataNotAvailable`.
/// - `fetch_heart_rate` reports an empty window as `Success(vec![])`.
/// - Permission faults map to `PermissionDenied`, everything unexpected to
///   `UnknownError` with the original failure as cause.
///
/// Callers are expected to pass well-formed windows (`0 <= start < end`);
/// [`HealthDataRepository`](crate::HealthDataRepository) enforces that.
#[async_trait]
pub trait HealthDataProvider: Send + Sync {
    /// Short platform label used in logs, e.g. `"android"`.
    fn platform(&self) -> &'static str;

    /// Check (Android) or request (iOS) read access to all required types.
    async fn request_authorization(&self) -> HealthResult<bool>;

    /// Cumulative steps over `[start_ms, end_ms)`.
    async fn fetch_step_count(&self, start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric>;

    /// Heart rate samples over `[start_ms, end_ms)`, ascending by sample time.
    async fn fetch_heart_rate(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>>;
}

/// Run a provider operation, turning a panic raised by host adapter code into
/// an `UnknownError` outcome.
pub async fn catch_native_panic<T, F>(operation: &'static str, future: F) -> HealthResult<T>
where
    F: Future<Output = HealthResult<T>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            error!(operation, detail = %detail, "Native layer panicked");
            HealthResult::unknown_error_with_cause(
                format!("Native layer failed during {}: {}", operation, detail),
                ErrorCause::from_message(detail),
            )
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
