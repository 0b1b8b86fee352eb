use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metric::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Metric::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Metric::Name).text().not_null())
                    .col(ColumnDef::new(Metric::Value).integer().not_null())
                    .col(ColumnDef::new(Metric::Tags).json_binary())
                    .col(ColumnDef::new(Metric::UserId).text())
                    .col(
                        ColumnDef::new(Metric::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metric_user")
                            .from(Metric::Table, Metric::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Metric::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Metric {
    Table,
    Id,
    Name,
    Value,
    Tags,
    #[iden = "userId"]
    UserId,
    Timestamp,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
