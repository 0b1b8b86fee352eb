//! Seed tool: populates a freshly migrated database with demo rows.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/app cargo run -p shipkit-app --bin seed
//! ```
//!
//! Exits non-zero on the first failure, including a duplicate demo user.

use anyhow::{Context as _, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use serde_json::json;
use tracing::info;

use shipkit_app::config::PoolSettings;
use shipkit_app::domain::repository::FeatureRequestRepository;
use shipkit_app::domain::types::{NewAccount, NewFeatureRequest, SubscriptionSnapshot};
use shipkit_app::infra::connection::LazyDatabase;
use shipkit_app::infra::db::{
    DbAccountRepository, DbFeatureRequestRepository, DbMetricRepository,
    DbSubscriptionRepository, DbUserRepository, DbWaitlistRepository,
};
use shipkit_app::usecase::account::LinkAccountUseCase;
use shipkit_app::usecase::metric::{RecordMetricInput, RecordMetricUseCase};
use shipkit_app::usecase::subscription::SyncSubscriptionUseCase;
use shipkit_app::usecase::user::{CreateUserInput, CreateUserUseCase};
use shipkit_app::usecase::waitlist::{JoinWaitlistInput, JoinWaitlistUseCase};
use shipkit_core::tracing::init_tracing;
use shipkit_domain::status::{FeatureStatus, SubscriptionStatus};

#[derive(Parser)]
#[command(about = "Insert demo rows into the database named by DATABASE_URL")]
struct Args {
    /// Email of the demo user
    #[arg(long, default_value = "demo@example.com")]
    email: String,

    /// Display name of the demo user
    #[arg(long, default_value = "Demo User")]
    name: String,
}

const FEATURE_REQUESTS: [(&str, &str, FeatureStatus); 4] = [
    (
        "Dark Mode Support",
        "Add dark mode toggle to the application settings",
        FeatureStatus::Completed,
    ),
    (
        "Export to CSV",
        "Allow users to export their data to CSV format",
        FeatureStatus::InProgress,
    ),
    (
        "Mobile App",
        "Native mobile app for iOS and Android",
        FeatureStatus::Planned,
    ),
    (
        "API Webhooks",
        "Send webhooks for important events",
        FeatureStatus::Pending,
    ),
];

const WAITLIST: [(&str, &str); 3] = [
    ("user1@example.com", "website"),
    ("user2@example.com", "twitter"),
    ("user3@example.com", "website"),
];

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info,sqlx=warn");
    let args = Args::parse();

    let mut lazy = LazyDatabase::from_env(PoolSettings::from_env());
    let db = lazy.connection().await?.clone();
    seed(db, &args).await.context("seeding failed")?;
    lazy.close().await?;
    info!("seeding completed");
    Ok(())
}

async fn seed(db: sea_orm::DatabaseConnection, args: &Args) -> Result<()> {
    let user = CreateUserUseCase {
        repo: DbUserRepository { db: db.clone() },
    }
    .execute(CreateUserInput {
        id: None,
        email: args.email.clone(),
        email_verified: true,
        name: Some(args.name.clone()),
        image: None,
    })
    .await
    .context("create demo user")?;
    info!(email = %user.email, "created demo user");

    LinkAccountUseCase {
        repo: DbAccountRepository { db: db.clone() },
    }
    .execute(NewAccount {
        user_id: user.id.clone(),
        account_id: user.id.clone(),
        provider_id: "credential".to_owned(),
        ..Default::default()
    })
    .await
    .context("link demo account")?;

    // Upvotes start at zero and only move together with vote rows.
    let requests = DbFeatureRequestRepository { db: db.clone() };
    for (title, description, status) in FEATURE_REQUESTS {
        requests
            .create(NewFeatureRequest {
                title: title.to_owned(),
                description: description.to_owned(),
                status,
                user_id: user.id.clone(),
            })
            .await
            .with_context(|| format!("create feature request {title:?}"))?;
    }
    info!(count = FEATURE_REQUESTS.len(), "created feature requests");

    let waitlist = JoinWaitlistUseCase {
        repo: DbWaitlistRepository { db: db.clone() },
    };
    for (email, source) in WAITLIST {
        waitlist
            .execute(JoinWaitlistInput {
                email: email.to_owned(),
                source: Some(source.to_owned()),
                referred_by: None,
            })
            .await
            .with_context(|| format!("add {email} to waitlist"))?;
    }
    info!(count = WAITLIST.len(), "created waitlist entries");

    SyncSubscriptionUseCase {
        repo: DbSubscriptionRepository { db: db.clone() },
    }
    .execute(SubscriptionSnapshot {
        user_id: user.id.clone(),
        stripe_customer_id: "cus_demo".to_owned(),
        stripe_subscription_id: "sub_demo".to_owned(),
        status: SubscriptionStatus::Trialing,
        price_id: "price_demo_pro".to_owned(),
        current_period_end: Some(Utc::now() + Duration::days(14)),
        cancel_at_period_end: false,
    })
    .await
    .context("create demo subscription")?;

    RecordMetricUseCase {
        repo: DbMetricRepository { db },
    }
    .execute(
        Some(&user.id),
        RecordMetricInput {
            name: "signup".to_owned(),
            value: 1,
            tags: Some(json!({ "source": "seed" })),
        },
    )
    .await
    .context("record demo metric")?;

    Ok(())
}
