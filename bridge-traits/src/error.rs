use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    /// The platform refused access (Android `SecurityException`).
    #[error("Security fault: {0}")]
    Security(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

impl BridgeError {
    /// Whether the host reported an authorization fault rather than a
    /// generic failure.
    pub fn is_security(&self) -> bool {
        matches!(self, BridgeError::Security(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
