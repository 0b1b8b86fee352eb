use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Waitlist::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Waitlist::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Waitlist::Email).text().not_null().unique_key())
                    .col(ColumnDef::new(Waitlist::Source).text())
                    .col(ColumnDef::new(Waitlist::ReferredBy).text())
                    .col(
                        ColumnDef::new(Waitlist::Notified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Waitlist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Waitlist::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Waitlist {
    Table,
    Id,
    Email,
    Source,
    #[iden = "referredBy"]
    ReferredBy,
    Notified,
    #[iden = "createdAt"]
    CreatedAt,
}
