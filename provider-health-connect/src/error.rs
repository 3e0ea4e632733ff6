//! Error types for the Health Connect provider

use bridge_traits::error::BridgeError;
use bridge_traits::health_connect::SdkStatus;
use thiserror::Error;

/// Health Connect provider errors
///
/// Internal to a single operation; the provider turns these into
/// `HealthResult` variants before returning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealthConnectError {
    /// Health Connect is missing, outdated, or the client could not be created
    #[error("Health Connect is not available (status {0:?})")]
    Unavailable(SdkStatus),

    /// The platform raised a `SecurityException`
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A millisecond timestamp outside chrono's representable range
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    /// A paging loop did not make progress
    #[error("Health Connect returned the same page token twice: {0}")]
    RepeatedPageToken(String),

    /// Any other bridge fault
    #[error(transparent)]
    Bridge(BridgeError),
}

/// Result type for Health Connect operations
pub type Result<T> = std::result::Result<T, HealthConnectError>;

impl From<BridgeError> for HealthConnectError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::Security(message) => HealthConnectError::PermissionDenied(message),
            BridgeError::NotAvailable(_) => {
                HealthConnectError::Unavailable(SdkStatus::Unavailable)
            }
            other => HealthConnectError::Bridge(other),
        }
    }
}
