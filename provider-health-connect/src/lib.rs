//! # Health Connect Provider
//!
//! Implements `HealthDataProvider` for Android Health Connect.
//!
//! ## Overview
//!
//! This module provides:
//! - Grant-state checks for the step count and heart rate read permissions
//! - Step totals summed across every page of `StepsRecord`s in a window
//! - Heart rate samples flattened out of `HeartRateRecord` series
//! - Mapping of `SecurityException` and other bridge faults into `HealthResult`

pub mod error;
pub mod provider;

pub use error::{HealthConnectError, Result};
pub use provider::{HealthConnectProvider, HEART_RATE_SOURCE, PLATFORM_SOURCE, REQUIRED_PERMISSIONS};
