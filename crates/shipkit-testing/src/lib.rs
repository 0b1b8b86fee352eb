//! Test utilities for Shipkit services.
//!
//! Import from dev-dependencies only, never in production code.

pub mod session;
