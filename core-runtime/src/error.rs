use thiserror::Error;

/// Infrastructure errors raised while configuring the core.
///
/// Health query outcomes never use this type; they are `HealthResult`s.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::CapabilityMissing {
            capability: "HealthDataProvider".to_string(),
            message: "inject a provider".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Capability missing: HealthDataProvider - inject a provider"
        );

        let error = Error::Config("bad offset".to_string());
        assert_eq!(error.to_string(), "Configuration error: bad offset");
    }
}
