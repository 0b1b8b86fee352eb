pub mod account;
pub mod feature_request;
pub mod metric;
pub mod session;
pub mod subscription;
pub mod user;
pub mod waitlist;
