//! # HealthKit Provider
//!
//! Implements `HealthDataProvider` for Apple HealthKit.
//!
//! ## Overview
//!
//! This module provides:
//! - Read authorization for step count and heart rate quantity types
//! - Cumulative step totals through statistics queries
//! - Heart rate samples through sample queries sorted by start date
//! - Callback-to-future bridging that stops native queries when dropped

pub mod error;
pub mod provider;
mod query;

pub use error::{HealthKitProviderError, Result};
pub use provider::{HealthKitProvider, HEART_RATE_SOURCE, PLATFORM_SOURCE};
