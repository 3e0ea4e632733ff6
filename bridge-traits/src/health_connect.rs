//! Health Connect Abstraction
//!
//! Surface of the Android Health Connect client that the core needs. Hosts
//! implement [`HealthConnectHost`] over their application context and hand
//! out a [`HealthConnectClient`] that forwards to `androidx.health.connect`.
//!
//! Failures are reported as [`BridgeError`](crate::error::BridgeError):
//! - `NotAvailable` when the Health Connect app is missing or outdated
//! - `Security` when the platform raises a `SecurityException`
//! - anything else for query faults

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Read permissions requested from Health Connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthPermission {
    ReadSteps,
    ReadHeartRate,
}

impl HealthPermission {
    /// Manifest permission string as declared by Health Connect.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthPermission::ReadSteps => "android.permission.health.READ_STEPS",
            HealthPermission::ReadHeartRate => "android.permission.health.READ_HEART_RATE",
        }
    }

    /// Parse a manifest permission string.
    pub fn from_manifest(value: &str) -> Option<Self> {
        match value {
            "android.permission.health.READ_STEPS" => Some(HealthPermission::ReadSteps),
            "android.permission.health.READ_HEART_RATE" => Some(HealthPermission::ReadHeartRate),
            _ => None,
        }
    }
}

impl fmt::Display for HealthPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `HealthConnectClient.getSdkStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkStatus {
    Available,
    Unavailable,
    ProviderUpdateRequired,
}

/// Inclusive-start, exclusive-end time window for a read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeFilter {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRangeFilter {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Parameters of a `readRecords` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecordsRequest {
    pub time_range: TimeRangeFilter,
    pub ascending_order: bool,
    pub page_size: u32,
    /// Continuation token from a previous response.
    pub page_token: Option<String>,
}

impl ReadRecordsRequest {
    /// Health Connect's own default page size.
    pub const DEFAULT_PAGE_SIZE: u32 = 1000;

    pub fn new(time_range: TimeRangeFilter) -> Self {
        Self {
            time_range,
            ascending_order: true,
            page_size: Self::DEFAULT_PAGE_SIZE,
            page_token: None,
        }
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }
}

/// Steps counted over a sub-interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsRecord {
    pub count: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Single beats-per-minute reading inside a [`HeartRateRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub time: DateTime<Utc>,
    pub beats_per_minute: i64,
}

/// Series record holding one or more heart rate samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub samples: Vec<HeartRateSample>,
}

/// One page of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecordsResponse<R> {
    pub records: Vec<R>,
    /// Present when more records remain.
    pub page_token: Option<String>,
}

impl<R> ReadRecordsResponse<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            page_token: None,
        }
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

/// Health Connect client trait
///
/// Mirrors the subset of `HealthConnectClient` used by the Android provider.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::health_connect::{HealthConnectClient, ReadRecordsRequest, TimeRangeFilter};
///
/// async fn total_steps(client: &dyn HealthConnectClient, filter: TimeRangeFilter) -> i64 {
///     let response = client.read_steps(ReadRecordsRequest::new(filter)).await.unwrap();
///     response.records.iter().map(|r| r.count).sum()
/// }
/// ```
#[async_trait::async_trait]
pub trait HealthConnectClient: Send + Sync {
    /// Permissions currently granted to the calling app.
    async fn granted_permissions(&self) -> Result<HashSet<HealthPermission>>;

    /// Read one page of `StepsRecord`s.
    async fn read_steps(&self, request: ReadRecordsRequest)
        -> Result<ReadRecordsResponse<StepsRecord>>;

    /// Read one page of `HeartRateRecord`s.
    async fn read_heart_rate(
        &self,
        request: ReadRecordsRequest,
    ) -> Result<ReadRecordsResponse<HeartRateRecord>>;
}

/// Application context handle
///
/// Passed to the Android provider at construction time. It replaces a
/// process-wide context holder: each provider owns the host it was built with.
pub trait HealthConnectHost: Send + Sync {
    /// Whether the Health Connect provider app is usable on this device.
    fn sdk_status(&self) -> SdkStatus;

    /// Equivalent of `HealthConnectClient.getOrCreate(context)`.
    fn client(&self) -> Result<Arc<dyn HealthConnectClient>>;
}
