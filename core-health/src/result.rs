//! Outcome type for health data operations
//!
//! Every provider and repository operation returns a [`HealthResult`]. It is a
//! closed set of five variants; consumers match on it exhaustively, so adding
//! a variant is a compile error for every call site rather than a silently
//! swallowed case.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::HealthError;

pub const DEFAULT_PERMISSION_DENIED_MESSAGE: &str =
    "Health data permission denied. Please enable permissions in Settings.";
pub const DEFAULT_DATA_NOT_AVAILABLE_MESSAGE: &str =
    "Health data not available for the requested time period.";
pub const DEFAULT_UNSUPPORTED_PLATFORM_MESSAGE: &str =
    "This health data type is not supported on this platform.";
pub const DEFAULT_UNKNOWN_ERROR_MESSAGE: &str =
    "An unknown error occurred while accessing health data.";

/// Stable error codes, as used by the native bridge modules when rejecting.
pub const PERMISSION_DENIED_CODE: &str = "PERMISSION_DENIED";
pub const DATA_NOT_AVAILABLE_CODE: &str = "DATA_NOT_AVAILABLE";
pub const UNSUPPORTED_PLATFORM_CODE: &str = "UNSUPPORTED_PLATFORM";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Underlying failure attached to [`HealthResult::UnknownError`].
///
/// Cheap to clone. Two causes compare equal when they render the same
/// message, which keeps outcomes structurally comparable.
#[derive(Clone)]
pub struct ErrorCause(Arc<dyn StdError + Send + Sync + 'static>);

impl ErrorCause {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Cause that only carries a message, e.g. a caught panic payload.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    pub fn get(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorCause").field(&self.0.to_string()).finish()
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ErrorCause {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl PartialEq for ErrorCause {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_string() == other.0.to_string()
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}

/// Result of a health data operation.
///
/// Exactly one variant is active; failure variants never carry a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthResult<T> {
    /// Operation completed with data
    Success(T),

    /// The user or the platform denied access
    PermissionDenied { message: String },

    /// The health store is missing, or returned nothing to show
    DataNotAvailable { message: String },

    /// The requested capability does not exist on this device or OS version
    UnsupportedPlatform { message: String },

    /// Anything else, including validation failures and native faults
    UnknownError {
        message: String,
        cause: Option<ErrorCause>,
    },
}

impl<T> HealthResult<T> {
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn data_not_available(message: impl Into<String>) -> Self {
        Self::DataNotAvailable {
            message: message.into(),
        }
    }

    pub fn unsupported_platform(message: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            message: message.into(),
        }
    }

    pub fn unknown_error(message: impl Into<String>) -> Self {
        Self::UnknownError {
            message: message.into(),
            cause: None,
        }
    }

    pub fn unknown_error_with_cause(message: impl Into<String>, cause: ErrorCause) -> Self {
        Self::UnknownError {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// `PermissionDenied` with the stock message.
    pub fn default_permission_denied() -> Self {
        Self::permission_denied(DEFAULT_PERMISSION_DENIED_MESSAGE)
    }

    /// `DataNotAvailable` with the stock message.
    pub fn default_data_not_available() -> Self {
        Self::data_not_available(DEFAULT_DATA_NOT_AVAILABLE_MESSAGE)
    }

    /// `UnsupportedPlatform` with the stock message.
    pub fn default_unsupported_platform() -> Self {
        Self::unsupported_platform(DEFAULT_UNSUPPORTED_PLATFORM_MESSAGE)
    }

    /// `UnknownError` with the stock message and no cause.
    pub fn default_unknown_error() -> Self {
        Self::unknown_error(DEFAULT_UNKNOWN_ERROR_MESSAGE)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Payload if successful.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Failure message, `None` iff the result is a success.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::PermissionDenied { message }
            | Self::DataNotAvailable { message }
            | Self::UnsupportedPlatform { message }
            | Self::UnknownError { message, .. } => Some(message),
        }
    }

    /// Stable code for the failure kind, `None` for a success.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Success(_) => None,
            Self::PermissionDenied { .. } => Some(PERMISSION_DENIED_CODE),
            Self::DataNotAvailable { .. } => Some(DATA_NOT_AVAILABLE_CODE),
            Self::UnsupportedPlatform { .. } => Some(UNSUPPORTED_PLATFORM_CODE),
            Self::UnknownError { .. } => Some(UNKNOWN_ERROR_CODE),
        }
    }

    pub fn cause(&self) -> Option<&ErrorCause> {
        match self {
            Self::UnknownError { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }

    /// Transform the payload, keeping failures untouched.
    pub fn map<U, F>(self, f: F) -> HealthResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(data) => HealthResult::Success(f(data)),
            Self::PermissionDenied { message } => HealthResult::PermissionDenied { message },
            Self::DataNotAvailable { message } => HealthResult::DataNotAvailable { message },
            Self::UnsupportedPlatform { message } => HealthResult::UnsupportedPlatform { message },
            Self::UnknownError { message, cause } => HealthResult::UnknownError { message, cause },
        }
    }

    /// Convert into a standard `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<T, HealthError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::PermissionDenied { message } => Err(HealthError::PermissionDenied(message)),
            Self::DataNotAvailable { message } => Err(HealthError::DataNotAvailable(message)),
            Self::UnsupportedPlatform { message } => {
                Err(HealthError::UnsupportedPlatform(message))
            }
            Self::UnknownError { message, cause } => Err(HealthError::Unknown { message, cause }),
        }
    }
}
