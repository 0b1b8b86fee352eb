use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeatureRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureRequest::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeatureRequest::Title).text().not_null())
                    .col(ColumnDef::new(FeatureRequest::Description).text().not_null())
                    .col(
                        ColumnDef::new(FeatureRequest::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(FeatureRequest::Upvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FeatureRequest::UserId).text().not_null())
                    .col(
                        ColumnDef::new(FeatureRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FeatureRequest::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feature_request_user")
                            .from(FeatureRequest::Table, FeatureRequest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FeatureRequest {
    Table,
    Id,
    Title,
    Description,
    Status,
    Upvotes,
    #[iden = "userId"]
    UserId,
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
