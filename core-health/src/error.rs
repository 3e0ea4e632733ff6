use thiserror::Error;

use crate::result::{
    ErrorCause, DATA_NOT_AVAILABLE_CODE, PERMISSION_DENIED_CODE, UNKNOWN_ERROR_CODE,
    UNSUPPORTED_PLATFORM_CODE,
};

/// Typed form of a failed [`HealthResult`](crate::HealthResult), for callers
/// that prefer `?` over matching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealthError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    DataNotAvailable(String),

    #[error("{0}")]
    UnsupportedPlatform(String),

    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        cause: Option<ErrorCause>,
    },
}

impl HealthError {
    pub fn code(&self) -> &'static str {
        match self {
            HealthError::PermissionDenied(_) => PERMISSION_DENIED_CODE,
            HealthError::DataNotAvailable(_) => DATA_NOT_AVAILABLE_CODE,
            HealthError::UnsupportedPlatform(_) => UNSUPPORTED_PLATFORM_CODE,
            HealthError::Unknown { .. } => UNKNOWN_ERROR_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;
