use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use shipkit_domain::id::new_id;

/// Usage data point. Survives deletion of its user with `userId` cleared.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "metric")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub value: i32,
    pub tags: Option<Json>,
    #[sea_orm(column_name = "userId")]
    pub user_id: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(new_id()),
            timestamp: Set(chrono::Utc::now()),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
