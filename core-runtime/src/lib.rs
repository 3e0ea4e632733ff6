//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the wellness core:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the service layer depends on.
//! It establishes the logging conventions and the fail-fast configuration
//! used to bind a platform provider.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{WellnessConfig, WellnessConfigBuilder};
pub use error::{Error, Result};
