//! Error types for the HealthKit provider

use bridge_traits::healthkit::{HealthKitError, QuantityTypeIdentifier};
use thiserror::Error;

/// HealthKit provider errors
///
/// Produced while running a single operation and converted into
/// `HealthResult` before the provider returns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealthKitProviderError {
    /// `HKHealthStore.isHealthDataAvailable()` returned false
    #[error("HealthKit is not available on this device")]
    Unavailable,

    /// The store does not know the requested quantity type
    #[error("Quantity type not available: {}", .0.as_str())]
    MissingType(QuantityTypeIdentifier),

    /// Error delivered through a completion handler
    #[error("HealthKit error: {0}")]
    HealthKit(#[from] HealthKitError),

    /// The store released a completion handler without calling it
    #[error("HealthKit dropped the completion handler without calling it")]
    CompletionDropped,

    /// A millisecond timestamp outside chrono's representable range
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

/// Result type for HealthKit operations
pub type Result<T> = std::result::Result<T, HealthKitProviderError>;
