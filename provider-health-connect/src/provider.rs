//! Health Connect provider implementation
//!
//! Implements the `HealthDataProvider` trait over the Android Health Connect
//! bridge.

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::health_connect::{
    HealthConnectClient, HealthConnectHost, HealthPermission, ReadRecordsRequest,
    ReadRecordsResponse, SdkStatus, TimeRangeFilter,
};
use chrono::{DateTime, Utc};
use core_health::{
    catch_native_panic, ErrorCause, HealthDataProvider, HealthMetric, HealthResult,
    HeartRateMeasurement,
};
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{HealthConnectError, Result};

/// `source` of step count metrics
pub const PLATFORM_SOURCE: &str = "android";

/// `source` of heart rate measurements
pub const HEART_RATE_SOURCE: &str = "HealthConnect";

/// Read permissions that must all be granted for authorization to succeed
pub const REQUIRED_PERMISSIONS: [HealthPermission; 2] =
    [HealthPermission::ReadSteps, HealthPermission::ReadHeartRate];

const NOT_INSTALLED_AUTHORIZATION_MESSAGE: &str =
    "Health Connect is not installed on this device. Please install it from the Play Store.";
const NOT_INSTALLED_MESSAGE: &str = "Health Connect is not installed on this device";
const MISSING_PERMISSION_MESSAGE: &str =
    "Health Connect permission not granted. Please grant step count and heart rate permissions in app settings.";
const STEPS_PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied. Please grant Health Connect permissions.";
const HEART_RATE_PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied for heart rate. Please grant Health Connect permissions.";
const NO_STEP_DATA_MESSAGE: &str = "No step count data available for the specified period";

/// Health Connect provider
///
/// Owns the host handle it was constructed with. The Health Connect client is
/// created on first use and reused afterwards; if creation fails, every
/// operation reports `DataNotAvailable`.
///
/// # Example
///
/// ```ignore
/// use provider_health_connect::HealthConnectProvider;
/// use core_health::HealthDataRepository;
///
/// let provider = HealthConnectProvider::new(Arc::new(AndroidHost::new(context)));
/// let repository = HealthDataRepository::new(Arc::new(provider));
/// ```
pub struct HealthConnectProvider {
    host: Arc<dyn HealthConnectHost>,
    client: OnceLock<std::result::Result<Arc<dyn HealthConnectClient>, SdkStatus>>,
}

impl HealthConnectProvider {
    pub fn new(host: Arc<dyn HealthConnectHost>) -> Self {
        Self {
            host,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<Arc<dyn HealthConnectClient>> {
        self.client
            .get_or_init(|| self.create_client())
            .clone()
            .map_err(HealthConnectError::Unavailable)
    }

    fn create_client(&self) -> std::result::Result<Arc<dyn HealthConnectClient>, SdkStatus> {
        let status = self.host.sdk_status();
        if status != SdkStatus::Available {
            warn!(?status, "Health Connect SDK is not available");
            return Err(status);
        }

        self.host.client().map_err(|error| {
            warn!(error = %error, "Failed to create Health Connect client");
            SdkStatus::Unavailable
        })
    }

    async fn granted_all(&self) -> Result<bool> {
        let client = self.client()?;
        let granted = client.granted_permissions().await?;

        let missing: Vec<HealthPermission> = REQUIRED_PERMISSIONS
            .iter()
            .copied()
            .filter(|permission| !granted.contains(permission))
            .collect();

        if !missing.is_empty() {
            debug!(?missing, "Health Connect permissions missing");
        }

        Ok(missing.is_empty())
    }

    /// Sum of every `StepsRecord` in the window, `None` when there are none.
    async fn total_steps(&self, start_ms: i64, end_ms: i64) -> Result<Option<i64>> {
        let handle = self.client()?;
        let client = handle.as_ref();
        let filter = time_range_filter(start_ms, end_ms)?;

        let records = read_all_pages(filter, |request| client.read_steps(request)).await?;
        if records.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            records
                .iter()
                .fold(0_i64, |total, record| total.saturating_add(record.count)),
        ))
    }

    async fn heart_rate_samples(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<HeartRateMeasurement>> {
        let handle = self.client()?;
        let client = handle.as_ref();
        let filter = time_range_filter(start_ms, end_ms)?;

        let records = read_all_pages(filter, |request| client.read_heart_rate(request)).await?;

        // Series records overlapping the window may carry samples outside it.
        let mut measurements: Vec<HeartRateMeasurement> = records
            .into_iter()
            .flat_map(|record| record.samples)
            .map(|sample| (sample.time.timestamp_millis(), sample.beats_per_minute))
            .filter(|(timestamp, _)| (start_ms..end_ms).contains(timestamp))
            .map(|(timestamp, bpm)| {
                HeartRateMeasurement::new(bpm as f64, timestamp, HEART_RATE_SOURCE)
            })
            .collect();
        measurements.sort_by_key(|measurement| measurement.timestamp);

        Ok(measurements)
    }
}

#[async_trait]
impl HealthDataProvider for HealthConnectProvider {
    fn platform(&self) -> &'static str {
        PLATFORM_SOURCE
    }

    #[instrument(skip(self))]
    async fn request_authorization(&self) -> HealthResult<bool> {
        catch_native_panic("request_authorization", async {
            match self.granted_all().await {
                Ok(true) => {
                    info!("Health Connect read permissions granted");
                    HealthResult::Success(true)
                }
                Ok(false) => {
                    info!("Health Connect read permissions not granted");
                    HealthResult::permission_denied(MISSING_PERMISSION_MESSAGE)
                }
                Err(HealthConnectError::Unavailable(status)) => {
                    warn!(?status, "Cannot check authorization without Health Connect");
                    HealthResult::data_not_available(NOT_INSTALLED_AUTHORIZATION_MESSAGE)
                }
                Err(error) => {
                    error!(error = %error, "Failed to check Health Connect authorization");
                    HealthResult::unknown_error_with_cause(
                        format!("Failed to check Health Connect authorization: {}", error),
                        ErrorCause::new(error),
                    )
                }
            }
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_step_count(&self, start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric> {
        catch_native_panic("fetch_step_count", async {
            match self.total_steps(start_ms, end_ms).await {
                Ok(Some(total)) => {
                    debug!(total, "Summed Health Connect steps");
                    HealthResult::Success(HealthMetric::step_count(
                        total as f64,
                        end_ms,
                        PLATFORM_SOURCE,
                    ))
                }
                Ok(None) => {
                    info!("No step records in window");
                    HealthResult::data_not_available(NO_STEP_DATA_MESSAGE)
                }
                Err(error) => map_fetch_error(
                    error,
                    STEPS_PERMISSION_DENIED_MESSAGE,
                    "Failed to fetch step count from Health Connect",
                ),
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
                    debug!(samples = measurements.len(), "Read Health Connect heart rate");
                    HealthResult::Success(measurements)
                }
                Err(error) => map_fetch_error(
                    error,
                    HEART_RATE_PERMISSION_DENIED_MESSAGE,
                    "Failed to fetch heart rate from Health Connect",
                ),
            }
        })
        .await
    }
}

impl std::fmt::Debug for HealthConnectProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthConnectProvider")
            .field("client_initialized", &self.client.get().is_some())
            .finish()
    }
}

fn time_range_filter(start_ms: i64, end_ms: i64) -> Result<TimeRangeFilter> {
    let start = DateTime::<Utc>::from_timestamp_millis(start_ms)
        .ok_or(HealthConnectError::InvalidTimestamp(start_ms))?;
    let end = DateTime::<Utc>::from_timestamp_millis(end_ms)
        .ok_or(HealthConnectError::InvalidTimestamp(end_ms))?;

    Ok(TimeRangeFilter::between(start, end))
}

/// Issue `read_page` until Health Connect stops returning a page token.
async fn read_all_pages<R, F, Fut>(filter: TimeRangeFilter, mut read_page: F) -> Result<Vec<R>>
where
    F: FnMut(ReadRecordsRequest) -> Fut,
    Fut: Future<Output = BridgeResult<ReadRecordsResponse<R>>>,
{
    let mut records = Vec::new();
    let mut page_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut pages = 0_usize;

    loop {
        let request = ReadRecordsRequest::new(filter).with_page_token(page_token.clone());
        let page = read_page(request).await?;
        pages += 1;
        records.extend(page.records);

        match page.page_token.filter(|token| !token.is_empty()) {
            Some(next) if !seen_tokens.insert(next.clone()) => {
                return Err(HealthConnectError::RepeatedPageToken(next));
            }
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    debug!(pages, records = records.len(), "Read Health Connect records");
    Ok(records)
}

fn map_fetch_error<T>(
    error: HealthConnectError,
    denied_message: &str,
    context: &str,
) -> HealthResult<T> {
    match error {
        HealthConnectError::Unavailable(status) => {
            warn!(?status, "Health Connect unavailable");
            HealthResult::data_not_available(NOT_INSTALLED_MESSAGE)
        }
        HealthConnectError::PermissionDenied(detail) => {
            warn!(detail = %detail, "Health Connect raised a security fault");
            HealthResult::permission_denied(denied_message)
        }
        other => {
            error!(error = %other, "{}", context);
            HealthResult::unknown_error_with_cause(
                format!("{}: {}", context, other),
                ErrorCause::new(other),
            )
        }
    }
}
