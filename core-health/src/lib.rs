//! # Core Health Module
//!
//! Shared health data access layer:
//! - [`HealthResult`] outcome type with five closed variants
//! - [`HealthMetric`] and [`HeartRateMeasurement`] domain records
//! - [`HealthDataProvider`] trait implemented per platform
//! - [`HealthDataRepository`] adding input validation on top of a provider
//!
//! ## Overview
//!
//! Consumers call the repository, the repository validates the window and
//! delegates to the provider, the provider talks to the platform store and
//! maps whatever comes back into a `HealthResult`. Failures never cross the
//! provider boundary as errors or panics; they arrive as outcome variants.

pub mod error;
pub mod models;
pub mod provider;
pub mod range;
pub mod repository;
pub mod result;

pub use error::{HealthError, Result};
pub use models::{HealthMetric, HeartRateMeasurement, STEPS_UNIT, STEP_COUNT_TYPE};
pub use provider::{catch_native_panic, HealthDataProvider};
pub use range::TimeRange;
pub use repository::HealthDataRepository;
pub use result::{ErrorCause, HealthResult};
