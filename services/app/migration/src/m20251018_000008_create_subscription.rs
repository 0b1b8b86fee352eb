use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscription::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscription::UserId).text().not_null())
                    .col(
                        ColumnDef::new(Subscription::StripeCustomerId)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscription::StripeSubscriptionId)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscription::Status).text().not_null())
                    .col(ColumnDef::new(Subscription::PriceId).text().not_null())
                    .col(ColumnDef::new(Subscription::CurrentPeriodEnd).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Subscription::CancelAtPeriodEnd)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Subscription::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Subscription::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_user")
                            .from(Subscription::Table, Subscription::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Subscription {
    Table,
    Id,
    #[iden = "userId"]
    UserId,
    #[iden = "stripeCustomerId"]
    StripeCustomerId,
    #[iden = "stripeSubscriptionId"]
    StripeSubscriptionId,
    Status,
    #[iden = "priceId"]
    PriceId,
    #[iden = "currentPeriodEnd"]
    CurrentPeriodEnd,
    #[iden = "cancelAtPeriodEnd"]
    CancelAtPeriodEnd,
    #[iden = "createdAt"]
    CreatedAt,
    #[iden = "updatedAt"]
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
