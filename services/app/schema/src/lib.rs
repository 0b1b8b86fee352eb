//! Sea-ORM entities for every table owned by the app service.
//!
//! Column names are camelCase to stay compatible with the auth provider's
//! tables. Every `ActiveModel::new()` fills the primary key with
//! [`shipkit_domain::id::new_id`] and the insertion timestamps with the current
//! time; callers overwrite only what they supply.

pub mod account;
pub mod feature_request;
pub mod metric;
pub mod session;
pub mod subscription;
pub mod user;
pub mod vote;
pub mod waitlist;
