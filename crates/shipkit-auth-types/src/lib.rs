//! Types describing the session object issued by the external auth provider.

pub mod session;
