use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use shipkit_domain::id::new_id;

/// Billing provider subscription mirrored for a user, keyed upstream by
/// `stripeSubscriptionId` (unique).
///
/// `status` is the provider's own string, see
/// [`shipkit_domain::status::SubscriptionStatus`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "userId")]
    pub user_id: String,
    #[sea_orm(column_name = "stripeCustomerId")]
    pub stripe_customer_id: String,
    #[sea_orm(column_name = "stripeSubscriptionId", unique)]
    pub stripe_subscription_id: String,
    pub status: String,
    #[sea_orm(column_name = "priceId")]
    pub price_id: String,
    #[sea_orm(column_name = "currentPeriodEnd")]
    pub current_period_end: Option<chrono::DateTime<chrono::Utc>>,
    #[sea_orm(column_name = "cancelAtPeriodEnd")]
    pub cancel_at_period_end: bool,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
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
        let now = chrono::Utc::now();
        Self {
            id: Set(new_id()),
            cancel_at_period_end: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
