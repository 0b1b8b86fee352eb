//! Domain types shared across Shipkit crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! The schema crate builds on `id`; services use the status and email types
//! in their `usecase/` and `domain/` layers.

pub mod email;
pub mod id;
pub mod status;
