use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Account::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Account::UserId).text().not_null())
                    .col(ColumnDef::new(Account::AccountId).text().not_null())
                    .col(ColumnDef::new(Account::ProviderId).text().not_null())
                    .col(ColumnDef::new(Account::AccessToken).text())
                    .col(ColumnDef::new(Account::RefreshToken).text())
                    .col(ColumnDef::new(Account::ExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_user")
                            .from(Account::Table, Account::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Account::Table)
                    .col(Account::ProviderId)
                    .col(Account::AccountId)
                    .name("uq_account_provider_account")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    #[iden = "userId"]
    UserId,
    #[iden = "accountId"]
    AccountId,
    #[iden = "providerId"]
    ProviderId,
    #[iden = "accessToken"]
    AccessToken,
    #[iden = "refreshToken"]
    RefreshToken,
    #[iden = "expiresAt"]
    ExpiresAt,
    #[iden = "createdAt"]
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
