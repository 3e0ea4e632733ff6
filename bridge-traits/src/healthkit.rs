//! HealthKit Abstraction
//!
//! Callback-shaped surface of `HKHealthStore`. The iOS provider wraps each
//! callback into a single future and forwards cancellation to
//! [`HealthKitStore::stop_query`].

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// `HKQuantityTypeIdentifier` values read by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityTypeIdentifier {
    StepCount,
    HeartRate,
}

impl QuantityTypeIdentifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityTypeIdentifier::StepCount => "HKQuantityTypeIdentifierStepCount",
            QuantityTypeIdentifier::HeartRate => "HKQuantityTypeIdentifierHeartRate",
        }
    }
}

/// Opaque quantity type handed out by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantityType {
    pub identifier: QuantityTypeIdentifier,
}

impl QuantityType {
    pub fn new(identifier: QuantityTypeIdentifier) -> Self {
        Self { identifier }
    }
}

/// `HKError.Code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthKitErrorCode {
    HealthDataUnavailable,
    HealthDataRestricted,
    InvalidArgument,
    AuthorizationDenied,
    AuthorizationNotDetermined,
    DatabaseInaccessible,
    UserCanceled,
    Other(i64),
}

impl HealthKitErrorCode {
    /// Map a raw `NSError.code` from the HealthKit domain.
    pub fn from_raw(code: i64) -> Self {
        match code {
            1 => Self::HealthDataUnavailable,
            2 => Self::HealthDataRestricted,
            3 => Self::InvalidArgument,
            4 => Self::AuthorizationDenied,
            5 => Self::AuthorizationNotDetermined,
            6 => Self::DatabaseInaccessible,
            7 => Self::UserCanceled,
            other => Self::Other(other),
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AuthorizationDenied | Self::AuthorizationNotDetermined
        )
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::HealthDataUnavailable | Self::HealthDataRestricted)
    }
}

/// Error delivered through a HealthKit completion handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{localized_description} (code {code:?})")]
pub struct HealthKitError {
    pub code: HealthKitErrorCode,
    pub localized_description: String,
}

impl HealthKitError {
    pub fn new(code: HealthKitErrorCode, localized_description: impl Into<String>) -> Self {
        Self {
            code,
            localized_description: localized_description.into(),
        }
    }
}

/// `HKQueryOptions`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOptions {
    None,
    StrictStartDate,
}

/// `HKQuery.predicateForSamples(withStart:end:options:)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePredicate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub options: QueryOptions,
}

/// `HKStatisticsQuery` with the `cumulativeSum` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsQuery {
    pub quantity_type: QuantityType,
    pub predicate: SamplePredicate,
}

/// Result of a statistics query. `sum_count` is the cumulative sum expressed
/// in `HKUnit.count()`; `None` when no samples matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub sum_count: Option<f64>,
}

/// `HKSampleQuery`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleQuery {
    pub sample_type: QuantityType,
    pub predicate: SamplePredicate,
    /// `None` maps to `HKObjectQueryNoLimit`.
    pub limit: Option<usize>,
    /// Sort by `HKSampleSortIdentifierStartDate`.
    pub ascending_by_start_date: bool,
}

/// Quantity sample with its value in `count/min`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySample {
    pub value_per_minute: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Anything `HKSampleQuery` can hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Quantity(QuantitySample),
    /// Non-quantity samples (category, workout, ...) the core ignores.
    Other,
}

/// Identifies a running query so it can be stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryHandle(pub u64);

impl fmt::Display for QueryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query#{}", self.0)
    }
}

pub type AuthorizationCompletion =
    Box<dyn FnOnce(std::result::Result<bool, HealthKitError>) + Send + 'static>;
pub type StatisticsCompletion =
    Box<dyn FnOnce(std::result::Result<Option<Statistics>, HealthKitError>) + Send + 'static>;
pub type SampleCompletion =
    Box<dyn FnOnce(std::result::Result<Option<Vec<Sample>>, HealthKitError>) + Send + 'static>;

/// HealthKit store trait
///
/// Hosts forward each call to `HKHealthStore`. Completions may run on any
/// thread and must be invoked at most once; a store that drops a completion
/// without calling it is treated as a failed query.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::healthkit::{HealthKitStore, QuantityTypeIdentifier};
///
/// fn can_read_steps(store: &dyn HealthKitStore) -> bool {
///     store.is_health_data_available()
///         && store.quantity_type(QuantityTypeIdentifier::StepCount).is_some()
/// }
/// ```
pub trait HealthKitStore: Send + Sync {
    /// `HKHealthStore.isHealthDataAvailable()`
    fn is_health_data_available(&self) -> bool;

    /// `HKQuantityType.quantityType(forIdentifier:)`
    fn quantity_type(&self, identifier: QuantityTypeIdentifier) -> Option<QuantityType>;

    /// Prompt for read access. The completion receives `Ok(true)` once the
    /// request was handled, which does not imply every type was granted.
    fn request_authorization(
        &self,
        read_types: Vec<QuantityType>,
        completion: AuthorizationCompletion,
    );

    fn execute_statistics_query(
        &self,
        query: StatisticsQuery,
        completion: StatisticsCompletion,
    ) -> QueryHandle;

    fn execute_sample_query(&self, query: SampleQuery, completion: SampleCompletion) -> QueryHandle;

    /// Stop a running query. Its completion must not be called afterwards.
    fn stop_query(&self, handle: QueryHandle);
}
