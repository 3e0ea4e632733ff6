//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the wellness core and the native
//! health stores. Each trait represents a capability the core requires but
//! that only the host can provide: the core never links against Health Connect
//! or HealthKit directly.
//!
//! ## Traits
//!
//! ### Health stores
//! - [`HealthConnectHost`](health_connect::HealthConnectHost) - Android context, hands out a client
//! - [`HealthConnectClient`](health_connect::HealthConnectClient) - Permissions and record reads
//! - [`HealthKitStore`](healthkit::HealthKitStore) - `HKHealthStore` with callback-style queries
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Bridge | Provider crate |
//! |----------|--------|----------------|
//! | Android  | `HealthConnectHost` | `provider-health-connect` |
//! | iOS      | `HealthKitStore`    | `provider-healthkit` |
//!
//! ## Error Handling
//!
//! Async bridge calls return [`BridgeError`](error::BridgeError). HealthKit
//! completions carry a [`HealthKitError`](healthkit::HealthKitError) with the
//! native error code. Providers translate both into `HealthResult` outcomes.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so providers can be shared across
//! async tasks.

pub mod error;
pub mod health_connect;
pub mod healthkit;
pub mod logging;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use health_connect::{
    HealthConnectClient, HealthConnectHost, HealthPermission, HeartRateRecord, HeartRateSample,
    ReadRecordsRequest, ReadRecordsResponse, SdkStatus, StepsRecord, TimeRangeFilter,
};
pub use healthkit::{
    HealthKitError, HealthKitErrorCode, HealthKitStore, QuantityType, QuantityTypeIdentifier,
    QueryHandle, Sample,
};
pub use logging::{LogEntry, LogLevel, LoggerSink};
pub use time::{Clock, FixedClock, SystemClock};
