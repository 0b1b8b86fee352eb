use sea_orm_migration::prelude::*;

mod m20251018_000001_create_user;
mod m20251018_000002_create_session;
mod m20251018_000003_create_account;
mod m20251018_000004_create_waitlist;
mod m20251018_000005_create_feature_request;
mod m20251018_000006_create_vote;
mod m20251018_000007_create_metric;
mod m20251018_000008_create_subscription;
mod m20251018_000009_add_foreign_key_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_user::Migration),
            Box::new(m20251018_000002_create_session::Migration),
            Box::new(m20251018_000003_create_account::Migration),
            Box::new(m20251018_000004_create_waitlist::Migration),
            Box::new(m20251018_000005_create_feature_request::Migration),
            Box::new(m20251018_000006_create_vote::Migration),
            Box::new(m20251018_000007_create_metric::Migration),
            Box::new(m20251018_000008_create_subscription::Migration),
            Box::new(m20251018_000009_add_foreign_key_indexes::Migration),
        ]
    }
}
