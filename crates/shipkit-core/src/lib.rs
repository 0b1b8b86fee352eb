//! Cross-cutting HTTP and observability helpers shared by Shipkit binaries.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
