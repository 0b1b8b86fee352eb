use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `(table, column, index name)` for every foreign key looked up by owner.
const INDEXES: [(&str, &str, &str); 6] = [
    ("session", "userId", "idx_session_user_id"),
    ("account", "userId", "idx_account_user_id"),
    ("feature_request", "userId", "idx_feature_request_user_id"),
    ("vote", "requestId", "idx_vote_request_id"),
    ("metric", "userId", "idx_metric_user_id"),
    ("subscription", "userId", "idx_subscription_user_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, column, name) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, _, name) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
