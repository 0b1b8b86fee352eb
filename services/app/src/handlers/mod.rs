pub mod billing;
pub mod feature_request;
pub mod health;
pub mod metric;
pub mod profile;
pub mod setup;
pub mod waitlist;
