use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use shipkit_app::domain::repository::{
    AccountRepository, FeatureRequestRepository, MetricRepository, SessionRepository,
    SubscriptionRepository, UserRepository, WaitlistRepository,
};
use shipkit_app::domain::types::{
    NewAccount, NewFeatureRequest, NewMetric, NewSession, NewUser, NewWaitlistEntry,
    SubscriptionSnapshot,
};
use shipkit_app::error::StoreError;
use shipkit_app::infra::db::{
    DbAccountRepository, DbFeatureRequestRepository, DbMetricRepository, DbSessionRepository,
    DbSubscriptionRepository, DbUserRepository, DbWaitlistRepository,
};
use shipkit_domain::id::ID_LEN;
use shipkit_domain::status::{FeatureStatus, SubscriptionStatus};
use shipkit_schema::{account, feature_request, metric, session, subscription, user, vote, waitlist};

use crate::helpers::{insert_user, migrated_db};

fn request_for(user_id: &str, title: &str) -> NewFeatureRequest {
    NewFeatureRequest {
        title: title.into(),
        description: "details".into(),
        status: FeatureStatus::Pending,
        user_id: user_id.into(),
    }
}

fn snapshot_for(user_id: &str, stripe_id: &str, status: SubscriptionStatus) -> SubscriptionSnapshot {
    SubscriptionSnapshot {
        user_id: user_id.into(),
        stripe_customer_id: "cus_1".into(),
        stripe_subscription_id: stripe_id.into(),
        status,
        price_id: "price_pro".into(),
        current_period_end: None,
        cancel_at_period_end: false,
    }
}

// ── Uniqueness ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_second_user_with_same_email() {
    let db = migrated_db().await;
    let repo = DbUserRepository { db: db.clone() };
    insert_user(&db, "a@x.com").await;

    let result = repo
        .create(NewUser {
            email: "a@x.com".into(),
            ..Default::default()
        })
        .await;

    assert!(
        matches!(result, Err(StoreError::Duplicate(_))),
        "expected Duplicate, got {result:?}"
    );
    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_second_waitlist_entry_with_same_email() {
    let db = migrated_db().await;
    let repo = DbWaitlistRepository { db: db.clone() };
    let entry = || NewWaitlistEntry {
        email: "a@x.com".into(),
        source: Some("website".into()),
        referred_by: None,
    };

    repo.add(entry()).await.unwrap();
    let result = repo.add(entry()).await;

    assert!(matches!(result, Err(StoreError::Duplicate(_))));
    assert_eq!(waitlist::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_linking_same_provider_account_twice() {
    let db = migrated_db().await;
    let alice = insert_user(&db, "alice@x.com").await;
    let bob = insert_user(&db, "bob@x.com").await;
    let repo = DbAccountRepository { db: db.clone() };
    let link = |user_id: &str| NewAccount {
        user_id: user_id.into(),
        account_id: "gh-1".into(),
        provider_id: "github".into(),
        ..Default::default()
    };

    repo.link(link(&alice.id)).await.unwrap();
    let result = repo.link(link(&bob.id)).await;

    assert!(matches!(result, Err(StoreError::Duplicate(_))));
    let found = repo.find_by_provider("github", "gh-1").await.unwrap().unwrap();
    assert_eq!(found.user_id, alice.id);
}

// ── Defaults ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fill_generated_id_and_defaults_on_insert() {
    let db = migrated_db().await;
    let user = insert_user(&db, "a@x.com").await;
    let entry = DbWaitlistRepository { db: db.clone() }
        .add(NewWaitlistEntry {
            email: "w@x.com".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let request = DbFeatureRequestRepository { db: db.clone() }
        .create(request_for(&user.id, "Dark mode"))
        .await
        .unwrap();

    assert_eq!(user.id.len(), ID_LEN);
    assert!(!user.email_verified);
    assert_eq!(user.created_at, user.updated_at);
    assert!(!entry.notified);
    assert_eq!(request.status, FeatureStatus::Pending);
    assert_eq!(request.upvotes, 0);
    assert_ne!(user.id, request.id);
}

#[tokio::test]
async fn should_honor_caller_supplied_user_id() {
    let db = migrated_db().await;
    let user = DbUserRepository { db: db.clone() }
        .create(NewUser {
            id: Some("provider-key".into()),
            email: "a@x.com".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.id, "provider-key");
}

#[tokio::test]
async fn should_keep_created_at_when_replacing_user() {
    let db = migrated_db().await;
    let repo = DbUserRepository { db: db.clone() };
    let mut user = insert_user(&db, "a@x.com").await;
    let created_at = user.created_at;

    user.name = Some("Alice".into());
    user.email_verified = true;
    let replaced = repo.replace(&user).await.unwrap();

    assert_eq!(replaced.created_at, created_at);
    assert!(replaced.updated_at >= created_at);
    assert_eq!(replaced.name.as_deref(), Some("Alice"));
    assert!(replaced.email_verified);
}

#[tokio::test]
async fn should_round_trip_unknown_status_values() {
    let db = migrated_db().await;
    let user = insert_user(&db, "a@x.com").await;
    let repo = DbFeatureRequestRepository { db: db.clone() };
    let mut new = request_for(&user.id, "Archive");
    new.status = FeatureStatus::from("archived");

    let created = repo.create(new).await.unwrap();
    let loaded = repo.find_by_id(&created.id).await.unwrap().unwrap();

    assert_eq!(loaded.status, FeatureStatus::Unknown("archived".into()));
    assert_eq!(loaded.status.as_str(), "archived");
}

// ── Referential actions ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_session_for_missing_user() {
    let db = migrated_db().await;
    let result = DbSessionRepository { db }
        .create(NewSession {
            user_id: "ghost".into(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await;
    assert!(
        matches!(result, Err(StoreError::MissingReference(_))),
        "expected MissingReference, got {result:?}"
    );
}

#[tokio::test]
async fn should_cascade_user_delete_and_null_metric_owner() {
    let db = migrated_db().await;
    let user = insert_user(&db, "a@x.com").await;
    let other = insert_user(&db, "b@x.com").await;

    DbSessionRepository { db: db.clone() }
        .create(NewSession {
            user_id: user.id.clone(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await
        .unwrap();
    DbAccountRepository { db: db.clone() }
        .link(NewAccount {
            user_id: user.id.clone(),
            account_id: user.id.clone(),
            provider_id: "credential".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let requests = DbFeatureRequestRepository { db: db.clone() };
    let own = requests.create(request_for(&user.id, "Mine")).await.unwrap();
    let theirs = requests.create(request_for(&other.id, "Theirs")).await.unwrap();
    requests.add_vote(&user.id, &theirs.id).await.unwrap();
    requests.add_vote(&other.id, &own.id).await.unwrap();
    DbSubscriptionRepository { db: db.clone() }
        .upsert_by_stripe_id(snapshot_for(&user.id, "sub_1", SubscriptionStatus::Active))
        .await
        .unwrap();
    let metrics = DbMetricRepository { db: db.clone() };
    let metric = metrics
        .record(NewMetric {
            name: "signup".into(),
            value: 1,
            tags: Some(json!({ "plan": "pro" })),
            user_id: Some(user.id.clone()),
        })
        .await
        .unwrap();

    assert!(DbUserRepository { db: db.clone() }.delete(&user.id).await.unwrap());

    assert_eq!(session::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(account::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(subscription::Entity::find().count(&db).await.unwrap(), 0);
    // Own request gone with the other user's vote on it; own vote on
    // the other request gone too.
    assert_eq!(feature_request::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(vote::Entity::find().count(&db).await.unwrap(), 0);
    let survivor = metrics.find_by_id(&metric.id).await.unwrap().unwrap();
    assert_eq!(survivor.user_id, None);
    assert_eq!(survivor.tags, Some(json!({ "plan": "pro" })));
    assert_eq!(metric::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_report_missing_user_on_delete() {
    let db = migrated_db().await;
    assert!(!DbUserRepository { db }.delete("ghost").await.unwrap());
}

#[tokio::test]
async fn should_prune_only_expired_sessions() {
    let db = migrated_db().await;
    let user = insert_user(&db, "a@x.com").await;
    let repo = DbSessionRepository { db: db.clone() };
    let now = Utc::now();
    for minutes in [1, 10] {
        repo.create(NewSession {
            user_id: user.id.clone(),
            expires_at: now + Duration::minutes(minutes),
        })
        .await
        .unwrap();
    }

    let removed = repo.delete_expired(now + Duration::minutes(5)).await.unwrap();

    assert_eq!(removed, 1);
    assert_eq!(repo.list_by_user(&user.id).await.unwrap().len(), 1);
}

// ── Subscription upsert ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_subscription_with_same_stripe_id() {
    let db = migrated_db().await;
    let user = insert_user(&db, "a@x.com").await;
    let repo = DbSubscriptionRepository { db: db.clone() };

    let first = repo
        .upsert_by_stripe_id(snapshot_for(&user.id, "sub_1", SubscriptionStatus::Trialing))
        .await
        .unwrap();
    let mut update = snapshot_for(&user.id, "sub_1", SubscriptionStatus::PastDue);
    update.cancel_at_period_end = true;
    let second = repo.upsert_by_stripe_id(update).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.status, SubscriptionStatus::PastDue);
    assert!(second.cancel_at_period_end);
    assert_eq!(subscription::Entity::find().count(&db).await.unwrap(), 1);
    let latest = repo.latest_for_user(&user.id).await.unwrap().unwrap();
    assert_eq!(latest.status, SubscriptionStatus::PastDue);
}
