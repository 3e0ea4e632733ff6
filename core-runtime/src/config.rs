//! # Core Configuration Module
//!
//! Provides configuration management for the wellness core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `WellnessConfig` instance that holds the injected platform provider and the
//! settings used to derive query windows. It enforces fail-fast validation so a
//! host learns about a missing provider at startup instead of on first query.
//!
//! ## Required Dependencies
//!
//! - `HealthDataProvider` - Health Connect on Android, HealthKit on iOS
//!
//! ## Optional Dependencies (with defaults)
//!
//! - `Clock` - Source of "now" for today/recent windows (default: system clock)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::WellnessConfig;
//! use std::sync::Arc;
//!
//! let config = WellnessConfig::builder()
//!     .provider(Arc::new(HealthKitProvider::new(store)))
//!     .utc_offset_minutes(-5 * 60)
//!     .heart_rate_lookback_minutes(30)
//!     .build()?;
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::WellnessConfig;
//!
//! // Panics with an actionable message naming the missing capability
//! let config = WellnessConfig::builder()
//!     .build()
//!     .expect("Should fail - missing provider");
//! ```

use crate::error::{Error, Result};
use bridge_traits::time::{Clock, SystemClock};
use chrono::{Duration, FixedOffset, Offset, Utc};
use core_health::HealthDataProvider;
use std::sync::Arc;

/// Default window for [`WellnessConfig::heart_rate_lookback`].
pub const DEFAULT_HEART_RATE_LOOKBACK_MINUTES: u32 = 60;

/// Largest accepted UTC offset (UTC-14:00 to UTC+14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Longest accepted heart rate lookback (7 days).
pub const MAX_HEART_RATE_LOOKBACK_MINUTES: u32 = 7 * 24 * 60;

/// Core configuration for the wellness core.
///
/// Use [`WellnessConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct WellnessConfig {
    /// Platform health data provider (required)
    pub provider: Arc<dyn HealthDataProvider>,

    /// Source of the current instant
    pub clock: Arc<dyn Clock>,

    /// Local offset used for calendar day windows
    pub utc_offset_minutes: i32,

    /// Length of the "recent heart rate" window
    pub heart_rate_lookback_minutes: u32,
}

impl std::fmt::Debug for WellnessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WellnessConfig")
            .field("provider", &self.provider.platform())
            .field("clock", &"Clock { ... }")
            .field("utc_offset_minutes", &self.utc_offset_minutes)
            .field(
                "heart_rate_lookback_minutes",
                &self.heart_rate_lookback_minutes,
            )
            .finish()
    }
}

impl WellnessConfig {
    /// Creates a new builder for constructing a `WellnessConfig`.
    pub fn builder() -> WellnessConfigBuilder {
        WellnessConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The UTC offset lies within ±14 hours
    /// - The heart rate lookback is greater than zero and at most 7 days
    pub fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(Error::Config(format!(
                "UTC offset of {} minutes is outside ±{} minutes",
                self.utc_offset_minutes, MAX_UTC_OFFSET_MINUTES
            )));
        }

        if self.heart_rate_lookback_minutes == 0 {
            return Err(Error::Config(
                "Heart rate lookback must be greater than 0 minutes".to_string(),
            ));
        }

        if self.heart_rate_lookback_minutes > MAX_HEART_RATE_LOOKBACK_MINUTES {
            return Err(Error::Config(format!(
                "Heart rate lookback exceeds maximum of 7 days ({} minutes)",
                MAX_HEART_RATE_LOOKBACK_MINUTES
            )));
        }

        Ok(())
    }

    /// Local offset for calendar day windows.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Length of the "recent heart rate" window.
    pub fn heart_rate_lookback(&self) -> Duration {
        Duration::minutes(i64::from(self.heart_rate_lookback_minutes))
    }
}

fn provider_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HealthDataProvider".to_string(),
        message: "A HealthDataProvider implementation is required to read health data. \
                 Android: enable the 'health-connect' feature and build a HealthConnectProvider \
                 over the application context. \
                 iOS: enable the 'healthkit' feature and build a HealthKitProvider \
                 over an HKHealthStore."
            .to_string(),
    }
}

/// Builder for constructing [`WellnessConfig`] instances.
///
/// Call [`build()`](WellnessConfigBuilder::build) once every required
/// dependency is set.
#[derive(Default)]
pub struct WellnessConfigBuilder {
    provider: Option<Arc<dyn HealthDataProvider>>,
    clock: Option<Arc<dyn Clock>>,
    utc_offset_minutes: Option<i32>,
    heart_rate_lookback_minutes: Option<u32>,
}

impl WellnessConfigBuilder {
    /// Sets the platform provider (required).
    pub fn provider(mut self, provider: Arc<dyn HealthDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the clock. Defaults to the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the local UTC offset in minutes.
    ///
    /// Default: 0 (UTC)
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::WellnessConfig;
    ///
    /// // Central European Summer Time
    /// let builder = WellnessConfig::builder().utc_offset_minutes(120);
    /// ```
    pub fn utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    /// Sets the "recent heart rate" window in minutes.
    ///
    /// Default: 60
    pub fn heart_rate_lookback_minutes(mut self, minutes: u32) -> Self {
        self.heart_rate_lookback_minutes = Some(minutes);
        self
    }

    /// Builds the final `WellnessConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(WellnessConfig)` on success, or an error if:
    /// - No provider was set ([`Error::CapabilityMissing`])
    /// - Configuration values are out of range ([`Error::Config`])
    pub fn build(self) -> Result<WellnessConfig> {
        let provider = self.provider.ok_or_else(provider_missing_error)?;

        let config = WellnessConfig {
            provider,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            utc_offset_minutes: self.utc_offset_minutes.unwrap_or(0),
            heart_rate_lookback_minutes: self
                .heart_rate_lookback_minutes
                .unwrap_or(DEFAULT_HEART_RATE_LOOKBACK_MINUTES),
        };

        config.validate()?;

        Ok(config)
    }
}
