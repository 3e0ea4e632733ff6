//! HealthKit provider implementation
//!
//! Implements the `HealthDataProvider` trait over the callback-shaped
//! `HealthKitStore` bridge. Every store callback is awaited as one future;
//! dropping that future stops the native query.

use async_trait::async_trait;
use bridge_traits::healthkit::{
    HealthKitError, HealthKitStore, QuantityType, QuantityTypeIdentifier, QueryHandle,
    QueryOptions, Sample, SampleQuery, SamplePredicate, Statistics, StatisticsQuery,
};
use chrono::{DateTime, Utc};
use core_health::{
    catch_native_panic, ErrorCause, HealthDataProvider, HealthMetric, HealthResult,
    HeartRateMeasurement,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{HealthKitProviderError, Result};
use crate::query::{completion_channel, Completion, QueryGuard};

/// `source` of step count metrics
pub const PLATFORM_SOURCE: &str = "ios";

/// `source` of heart rate measurements
pub const HEART_RATE_SOURCE: &str = "HealthKit";

const UNAVAILABLE_MESSAGE: &str = "HealthKit is not available on this device";
const STEPS_PERMISSION_DENIED_MESSAGE: &str =
    "HealthKit permission denied. Please enable in Settings.";
const HEART_RATE_PERMISSION_DENIED_MESSAGE: &str =
    "HealthKit permission denied for heart rate. Please enable in Settings.";
const NO_STATISTICS_MESSAGE: &str = "No step count data available for the specified period";
const NO_SUM_MESSAGE: &str = "No step count data recorded for this period";

/// HealthKit provider
///
/// # Example
///
/// ```ignore
/// use provider_healthkit::HealthKitProvider;
/// use core_health::HealthDataRepository;
///
/// let provider = HealthKitProvider::new(Arc::new(IosHealthStore::new()));
/// let repository = HealthDataRepository::new(Arc::new(provider));
/// ```
pub struct HealthKitProvider {
    store: Arc<dyn HealthKitStore>,
}

impl HealthKitProvider {
    pub fn new(store: Arc<dyn HealthKitStore>) -> Self {
        Self { store }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.store.is_health_data_available() {
            Ok(())
        } else {
            Err(HealthKitProviderError::Unavailable)
        }
    }

    fn quantity_type(&self, identifier: QuantityTypeIdentifier) -> Result<QuantityType> {
        self.store
            .quantity_type(identifier)
            .ok_or(HealthKitProviderError::MissingType(identifier))
    }

    /// Start a query and wait for its completion. Stops the query if the
    /// returned future is dropped first.
    async fn run_query<T, S>(&self, start: S) -> Result<T>
    where
        T: Send + 'static,
        S: FnOnce(&dyn HealthKitStore, Completion<T>) -> QueryHandle,
    {
        let (completion, pending) = completion_channel();
        let handle = start(self.store.as_ref(), completion);
        debug!(%handle, "HealthKit query started");

        let guard = QueryGuard::new(Arc::clone(&self.store), handle);
        let result = pending.wait().await;
        guard.disarm();

        result
    }

    async fn authorize(&self) -> Result<bool> {
        self.ensure_available()?;
        let read_types = vec![
            self.quantity_type(QuantityTypeIdentifier::StepCount)?,
            self.quantity_type(QuantityTypeIdentifier::HeartRate)?,
        ];

        let (completion, pending) = completion_channel();
        self.store.request_authorization(read_types, completion);
        pending.wait().await
    }

    async fn step_statistics(&self, start_ms: i64, end_ms: i64) -> Result<Option<Statistics>> {
        self.ensure_available()?;
        let query = StatisticsQuery {
            quantity_type: self.quantity_type(QuantityTypeIdentifier::StepCount)?,
            predicate: sample_predicate(start_ms, end_ms, QueryOptions::None)?,
        };

        self.run_query(move |store, completion| store.execute_statistics_query(query, completion))
            .await
    }

    async fn heart_rate_samples(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<HeartRateMeasurement>> {
        self.ensure_available()?;
        let query = SampleQuery {
            sample_type: self.quantity_type(QuantityTypeIdentifier::HeartRate)?,
            predicate: sample_predicate(start_ms, end_ms, QueryOptions::StrictStartDate)?,
            limit: None,
            ascending_by_start_date: true,
        };

        let samples = self
            .run_query(move |store, completion| store.execute_sample_query(query, completion))
            .await?;

        let mut measurements: Vec<HeartRateMeasurement> = samples
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sample| match sample {
                Sample::Quantity(quantity) => Some(HeartRateMeasurement::new(
                    quantity.value_per_minute,
                    quantity.start_date.timestamp_millis(),
                    HEART_RATE_SOURCE,
                )),
                Sample::Other => None,
            })
            .collect();
        measurements.sort_by_key(|measurement| measurement.timestamp);

        Ok(measurements)
    }
}

#[async_trait]
impl HealthDataProvider for HealthKitProvider {
    fn platform(&self) -> &'static str {
        PLATFORM_SOURCE
    }

    #[instrument(skip(self))]
    async fn request_authorization(&self) -> HealthResult<bool> {
        catch_native_panic("request_authorization", async {
            match self.authorize().await {
                Ok(true) => {
                    info!("HealthKit authorization request handled");
                    HealthResult::Success(true)
                }
                Ok(false) => {
                    info!("HealthKit authorization not granted");
                    HealthResult::default_permission_denied()
                }
                Err(HealthKitProviderError::Unavailable) => {
                    warn!("HealthKit unavailable, cannot request authorization");
                    HealthResult::data_not_available(UNAVAILABLE_MESSAGE)
                }
                Err(HealthKitProviderError::MissingType(identifier)) => {
                    warn!(identifier = identifier.as_str(), "Quantity type missing");
                    HealthResult::unknown_error(format!(
                        "{} type not available",
                        type_label(identifier)
                    ))
                }
                Err(HealthKitProviderError::HealthKit(error)) if error.code.is_unavailable() => {
                    warn!(error = %error, "HealthKit data unavailable");
                    HealthResult::data_not_available(UNAVAILABLE_MESSAGE)
                }
                Err(HealthKitProviderError::HealthKit(error)) => {
                    warn!(error = %error, "HealthKit authorization failed");
                    HealthResult::permission_denied(format!(
                        "HealthKit authorization denied: {}",
                        error.localized_description
                    ))
                }
                Err(other) => {
                    error!(error = %other, "HealthKit authorization failed");
                    HealthResult::unknown_error_with_cause(
                        format!("Failed to request HealthKit authorization: {}", other),
                        ErrorCause::new(other),
                    )
                }
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_step_count(&self, start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric> {
        catch_native_panic("fetch_step_count", async {
            match self.step_statistics(start_ms, end_ms).await {
                Ok(Some(Statistics {
                    sum_count: Some(total),
                })) => {
                    debug!(total, "HealthKit step statistics received");
                    HealthResult::Success(HealthMetric::step_count(total, end_ms, PLATFORM_SOURCE))
                }
                Ok(Some(Statistics { sum_count: None })) => {
                    info!("HealthKit statistics carried no sum");
                    HealthResult::data_not_available(NO_SUM_MESSAGE)
                }
                Ok(None) => {
                    info!("No HealthKit statistics in window");
                    HealthResult::data_not_available(NO_STATISTICS_MESSAGE)
                }
                Err(error) => map_fetch_error(error, STEPS_PERMISSION_DENIED_MESSAGE),
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_heart_rate(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        catch_native_panic("fetch_heart_rate", async {
            match self.heart_rate_samples(start_ms, end_ms).await {
                Ok(measurements) => {
                    debug!(samples = measurements.len(), "HealthKit heart rate received");
                    HealthResult::Success(measurements)
                }
                Err(error) => map_fetch_error(error, HEART_RATE_PERMISSION_DENIED_MESSAGE),
            }
        })
        .await
    }
}

impl std::fmt::Debug for HealthKitProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthKitProvider")
            .field("available", &self.store.is_health_data_available())
            .finish()
    }
}

fn type_label(identifier: QuantityTypeIdentifier) -> &'static str {
    match identifier {
        QuantityTypeIdentifier::StepCount => "Step count",
        QuantityTypeIdentifier::HeartRate => "Heart rate",
    }
}

fn sample_predicate(start_ms: i64, end_ms: i64, options: QueryOptions) -> Result<SamplePredicate> {
    let start = DateTime::<Utc>::from_timestamp_millis(start_ms)
        .ok_or(HealthKitProviderError::InvalidTimestamp(start_ms))?;
    let end = DateTime::<Utc>::from_timestamp_millis(end_ms)
        .ok_or(HealthKitProviderError::InvalidTimestamp(end_ms))?;

    Ok(SamplePredicate {
        start,
        end,
        options,
    })
}

fn map_fetch_error<T>(error: HealthKitProviderError, denied_message: &str) -> HealthResult<T> {
    match error {
        HealthKitProviderError::Unavailable => {
            warn!("HealthKit unavailable");
            HealthResult::data_not_available(UNAVAILABLE_MESSAGE)
        }
        HealthKitProviderError::MissingType(identifier) => {
            warn!(identifier = identifier.as_str(), "Quantity type missing");
            HealthResult::unsupported_platform(format!(
                "{} type not available on this device",
                type_label(identifier)
            ))
        }
        HealthKitProviderError::HealthKit(error) => map_healthkit_error(error, denied_message),
        other => {
            error!(error = %other, "HealthKit query failed");
            HealthResult::unknown_error_with_cause(
                format!("HealthKit query failed: {}", other),
                ErrorCause::new(other),
            )
        }
    }
}

fn map_healthkit_error<T>(error: HealthKitError, denied_message: &str) -> HealthResult<T> {
    if error.code.is_authorization() {
        warn!(error = %error, "HealthKit denied access");
        return HealthResult::permission_denied(denied_message);
    }

    if error.code.is_unavailable() {
        warn!(error = %error, "HealthKit data unavailable");
        return HealthResult::data_not_available(format!(
            "HealthKit data unavailable: {}",
            error.localized_description
        ));
    }

    error!(error = %error, "HealthKit error");
    HealthResult::unknown_error_with_cause(
        format!("HealthKit error: {}", error.localized_description),
        ErrorCause::new(error),
    )
}
