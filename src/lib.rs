//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-service` and the platform providers). Host
//! applications can depend on `wellness-workspace` and enable `health-connect`
//! or `healthkit` without wiring each crate individually.

#[cfg(any(feature = "health-connect", feature = "healthkit"))]
pub use core_service::*;
