//! Core service façade and bootstrap helpers.
//!
//! This crate wires a platform [`HealthDataProvider`] into the shared health
//! repository. Android hosts enable the `health-connect` feature and call
//! [`bootstrap_health_connect`]; iOS hosts enable the `healthkit` feature and
//! call [`bootstrap_healthkit`]. Any other provider can be injected through
//! [`WellnessConfig`] and [`WellnessService::new`].

pub mod error;

pub use error::{CoreError, Result};

pub use core_health::{
    HealthDataProvider, HealthDataRepository, HealthMetric, HealthResult, HeartRateMeasurement,
    TimeRange,
};
pub use core_runtime::config::{WellnessConfig, WellnessConfigBuilder};

use std::sync::Arc;
use tracing::warn;

#[cfg(feature = "health-connect")]
use bridge_traits::health_connect::HealthConnectHost;
#[cfg(feature = "healthkit")]
use bridge_traits::healthkit::HealthKitStore;

/// Primary façade exposed to host applications.
///
/// Thin layer over [`HealthDataRepository`] that also derives "today" and
/// "recent" windows from the configured clock and UTC offset.
#[derive(Clone)]
pub struct WellnessService {
    config: Arc<WellnessConfig>,
    repository: HealthDataRepository,
}

impl WellnessService {
    /// Create a new service from a built configuration.
    pub fn new(config: WellnessConfig) -> Self {
        let repository = HealthDataRepository::new(Arc::clone(&config.provider));
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    /// Access the configuration the service was built with.
    pub fn config(&self) -> Arc<WellnessConfig> {
        Arc::clone(&self.config)
    }

    pub fn repository(&self) -> &HealthDataRepository {
        &self.repository
    }

    pub fn platform(&self) -> &'static str {
        self.config.provider.platform()
    }

    pub async fn request_permissions(&self) -> HealthResult<bool> {
        self.repository.request_permissions().await
    }

    pub async fn get_step_count(&self, start_ms: i64, end_ms: i64) -> HealthResult<HealthMetric> {
        self.repository.get_step_count(start_ms, end_ms).await
    }

    pub async fn get_heart_rate(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> HealthResult<Vec<HeartRateMeasurement>> {
        self.repository.get_heart_rate(start_ms, end_ms).await
    }

    /// Steps for the local calendar day containing the clock's current
    /// instant.
    pub async fn get_today_step_count(&self) -> HealthResult<HealthMetric> {
        match self.today() {
            Some(range) => self.repository.get_step_count_in(range).await,
            None => HealthResult::unknown_error("Unable to compute today's window"),
        }
    }

    /// Heart rate samples over the configured lookback, ending now.
    pub async fn get_recent_heart_rate(&self) -> HealthResult<Vec<HeartRateMeasurement>> {
        match self.recent() {
            Some(range) => self.repository.get_heart_rate_in(range).await,
            None => HealthResult::unknown_error("Unable to compute heart rate window"),
        }
    }

    /// Local calendar day window for the clock's current instant.
    pub fn today(&self) -> Option<TimeRange> {
        let range = TimeRange::day_containing(self.config.clock.now(), self.config.utc_offset());
        if range.is_none() {
            warn!(
                utc_offset_minutes = self.config.utc_offset_minutes,
                "Day window out of range"
            );
        }
        range
    }

    /// Trailing heart rate window ending at the clock's current instant.
    pub fn recent(&self) -> Option<TimeRange> {
        let range =
            TimeRange::trailing(self.config.clock.now(), self.config.heart_rate_lookback());
        if range.is_none() {
            warn!(
                lookback_minutes = self.config.heart_rate_lookback_minutes,
                "Heart rate window out of range"
            );
        }
        range
    }
}

impl std::fmt::Debug for WellnessService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WellnessService")
            .field("config", &self.config)
            .finish()
    }
}

/// Convenience bootstrapper for Android hosts.
///
/// `builder` carries the optional settings (clock, offset, lookback); its
/// provider is replaced with a Health Connect provider over `host`.
///
/// ```
/// # use bridge_traits::health_connect::HealthConnectHost;
/// # use std::sync::Arc;
/// # fn example(host: Arc<dyn HealthConnectHost>) -> core_service::Result<()> {
/// use core_service::{bootstrap_health_connect, WellnessConfig};
///
/// let builder = WellnessConfig::builder().utc_offset_minutes(60);
/// let service = bootstrap_health_connect(host, builder)?;
/// assert_eq!(service.platform(), "android");
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "health-connect")]
pub fn bootstrap_health_connect(
    host: Arc<dyn HealthConnectHost>,
    builder: WellnessConfigBuilder,
) -> Result<WellnessService> {
    use provider_health_connect::HealthConnectProvider;

    let config = builder
        .provider(Arc::new(HealthConnectProvider::new(host)))
        .build()?;
    tracing::info!(platform = config.provider.platform(), "Wellness core bootstrapped");
    Ok(WellnessService::new(config))
}

/// Convenience bootstrapper for iOS hosts.
///
/// `builder` carries the optional settings (clock, offset, lookback); its
/// provider is replaced with a HealthKit provider over `store`.
#[cfg(feature = "healthkit")]
pub fn bootstrap_healthkit(
    store: Arc<dyn HealthKitStore>,
    builder: WellnessConfigBuilder,
) -> Result<WellnessService> {
    use provider_healthkit::HealthKitProvider;

    let config = builder
        .provider(Arc::new(HealthKitProvider::new(store)))
        .build()?;
    tracing::info!(platform = config.provider.platform(), "Wellness core bootstrapped");
    Ok(WellnessService::new(config))
}
