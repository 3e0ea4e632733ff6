//! Health data repository
//!
//! Validates time windows, then delegates to the injected provider. The same
//! rules apply whichever platform provider is bound, so providers only ever
//! see well-formed ranges.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::models::{HealthMetric, HeartRateMeasurement};
use crate::provider::HealthDataProvider;
use crate::range::TimeRange;
use crate::result::HealthResult;

pub const NEGATIVE_TIMESTAMP_MESSAGE: &str = "Timestamps cannot be negative";
pub const INVALID_ORDER_MESSAGE: &str = "Start date must be before end date";

/// Repository over exactly one [`HealthDataProvider`].
///
/// # Example
///
/// ```ignore
/// use core_health::HealthDataRepository;
/// use std::sync::Arc;
///
/// let repository = HealthDataRepository::new(Arc::new(provider));
/// match repository.get_step_count(start_ms, end_ms).await {
///     HealthResult::Success(metric) => println!("{} steps", metric.value),
///     HealthResult::PermissionDenied { message } => prompt_for_access(message),
///     HealthResult::DataNotAvailable { message } => show_empty_state(message),
///     HealthResult::UnsupportedPlatform { message }
///     | HealthResult::UnknownError { message, .. } => show_error(message),
/// }
/// ```
#[derive(Clone)]
pub struct HealthDataRepository {
    provider: Arc<dyn HealthDataProvider>,
}

impl HealthDataRepository {
    pub fn new(provider: Arc<dyn HealthDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn HealthDataProvider> {
        &self.provider
    }

    /// Ask the provider for read access. No added logic.
    #[instrument(skip(self), fields(platform = self.provider.platform()))]
    pub async fn request_permissions(&self) -> HealthResult<bool> {
        let result = self.provider.request_authorization().await;
        debug!(outcome = outcome_label(&result), "Authorization checked");
        result
    }

    /// Total steps over `[start_ms, end_ms)`.
    #[instrument(skip(self), fields(platform = self.provider.platform()))]
    pub async fn get_step_count(&self, start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric> {
        if let Err(message) = validate_range(start_ms, end_ms) {
            warn!(start_ms, end_ms, "Rejected step count window: {}", message);
            return HealthResult::unknown_error(message);
        }

        let result = self.provider.fetch_step_count(start_ms, end_ms).await;
        debug!(outcome = outcome_label(&result), "Step count fetched");
        result
    }

    /// Heart rate samples over `[start_ms, end_ms)`.
    #[instrument(skip(self), fields(platform = self.provider.platform()))]
    pub async fn get_heart_rate(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        if let Err(message) = validate_range(start_ms, end_ms) {
            warn!(start_ms, end_ms, "Rejected heart rate window: {}", message);
            return HealthResult::unknown_error(message);
        }

        let result = self.provider.fetch_heart_rate(start_ms, end_ms).await;
        debug!(
            outcome = outcome_label(&result),
            samples = result.data().map(Vec::len).unwrap_or(0),
            "Heart rate fetched"
        );
        result
    }

    pub async fn get_step_count_in(&self, range: TimeRange) -> HealthResult<HealthMetric> {
        self.get_step_count(range.start_ms, range.end_ms).await
    }

    pub async fn get_heart_rate_in(
        &self,
        range: TimeRange,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        self.get_heart_rate(range.start_ms, range.end_ms).await
    }
}

impl std::fmt::Debug for HealthDataRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthDataRepository")
            .field("provider", &self.provider.platform())
            .finish()
    }
}

fn validate_range(start_ms: i64, end_ms: i64) -> Result<(), &'static str> {
    if start_ms < 0 || end_ms < 0 {
        return Err(NEGATIVE_TIMESTAMP_MESSAGE);
    }

    if start_ms >= end_ms {
        return Err(INVALID_ORDER_MESSAGE);
    }

    Ok(())
}

fn outcome_label<T>(result: &HealthResult<T>) -> &'static str {
    result.error_code().unwrap_or("SUCCESS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert_eq!(validate_range(0, 1), Ok(()));
        assert_eq!(validate_range(-1, 10), Err(NEGATIVE_TIMESTAMP_MESSAGE));
        assert_eq!(validate_range(10, -1), Err(NEGATIVE_TIMESTAMP_MESSAGE));
        assert_eq!(validate_range(10, 10), Err(INVALID_ORDER_MESSAGE));
        assert_eq!(validate_range(11, 10), Err(INVALID_ORDER_MESSAGE));
    }

    #[test]
    fn test_negative_check_runs_before_ordering_check() {
        // Both rules are violated; negativity wins.
        assert_eq!(validate_range(-5, -10), Err(NEGATIVE_TIMESTAMP_MESSAGE));
    }
}
