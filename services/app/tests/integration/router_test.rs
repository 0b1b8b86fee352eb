use axum::http::{Method, StatusCode};
use serde_json::json;

use shipkit_app::domain::repository::SubscriptionRepository;
use shipkit_app::domain::types::SubscriptionSnapshot;
use shipkit_app::infra::db::DbSubscriptionRepository;
use shipkit_domain::status::SubscriptionStatus;
use shipkit_testing::session::MockSession;

use crate::helpers::{app_with, migrated_db, send};

// ── Health & setup ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_healthy_with_version() {
    let app = app_with(migrated_db().await);

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn should_check_env_presence_without_leaking_value() {
    let app = app_with(migrated_db().await);

    let (status, body) = send(&app, Method::GET, "/api/check-env?var=PATH", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "exists": true }));

    let uri = "/api/check-env?var=SHIPKIT_TEST_SURELY_UNSET";
    let (_, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(body, json!({ "exists": false }));

    let (status, _) = send(&app, Method::GET, "/api/check-env", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Waitlist ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_join_waitlist_once() {
    let app = app_with(migrated_db().await);
    let body = json!({ "email": "a@x.com" });

    let (status, first) = send(&app, Method::POST, "/api/waitlist", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({ "success": true, "message": "Successfully added to waitlist" })
    );

    let (status, second) = send(&app, Method::POST, "/api/waitlist", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(second["kind"], "ALREADY_ON_WAITLIST");
}

#[tokio::test]
async fn should_reject_malformed_waitlist_email() {
    let app = app_with(migrated_db().await);
    let body = json!({ "email": "nope" });

    let (status, body) = send(&app, Method::POST, "/api/waitlist", None, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_EMAIL");
    assert_eq!(body["message"], "invalid email address");
}

#[tokio::test]
async fn should_reject_waitlist_body_without_email_as_json_error() {
    let app = app_with(migrated_db().await);
    let body = json!({ "source": "twitter" });

    let (status, body) = send(&app, Method::POST, "/api/waitlist", None, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_EMAIL");
}

#[tokio::test]
async fn should_reject_waitlist_request_without_body() {
    let app = app_with(migrated_db().await);

    let (status, body) = send(&app, Method::POST, "/api/waitlist", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MISSING_DATA");
}

// ── Session-scoped routes ────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_session_for_profile() {
    let app = app_with(migrated_db().await);

    let (status, _) = send(&app, Method::GET, "/api/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = MockSession::new("u1", "a@x.com").expired();
    let (status, _) = send(&app, Method::GET, "/api/me", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_sync_session_user_into_profile() {
    let app = app_with(migrated_db().await);
    let session = MockSession::new("u1", "a@x.com").with_name("Alice");

    let (status, body) = send(&app, Method::GET, "/api/me", Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "u1");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["emailVerified"], true);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["providers"], json!([]));

    let renamed = MockSession::new("u1", "a@x.com").with_name("Alice B.");
    let (_, after) = send(&app, Method::GET, "/api/me", Some(&renamed), None).await;
    assert_eq!(after["name"], "Alice B.");
    assert_eq!(after["createdAt"], body["createdAt"]);
}

#[tokio::test]
async fn should_delete_profile_once() {
    let app = app_with(migrated_db().await);
    let session = MockSession::new("u1", "a@x.com");
    send(&app, Method::GET, "/api/me", Some(&session), None).await;

    let (status, _) = send(&app, Method::DELETE, "/api/me", Some(&session), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, "/api/me", Some(&session), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_run_feature_request_vote_flow() {
    let app = app_with(migrated_db().await);
    let author = MockSession::new("author", "author@x.com");
    let voter = MockSession::new("voter", "voter@x.com");
    for session in [&author, &voter] {
        send(&app, Method::GET, "/api/me", Some(session), None).await;
    }

    let body = json!({ "title": "Dark mode", "description": "Easier on the eyes" });
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/feature-requests",
        Some(&author),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["upvotes"], 0);
    let votes_uri = format!(
        "/api/feature-requests/{}/votes",
        created["id"].as_str().unwrap()
    );

    let (status, _) = send(&app, Method::POST, &votes_uri, Some(&voter), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, &votes_uri, Some(&voter), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ALREADY_VOTED");

    let (_, list) = send(&app, Method::GET, "/api/feature-requests", None, None).await;
    assert_eq!(list[0]["upvotes"], 1);

    let (status, _) = send(&app, Method::DELETE, &votes_uri, Some(&voter), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::DELETE, &votes_uri, Some(&voter), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "VOTE_NOT_FOUND");

    let (_, list) = send(&app, Method::GET, "/api/feature-requests", None, None).await;
    assert_eq!(list[0]["upvotes"], 0);
}

#[tokio::test]
async fn should_return_not_found_for_vote_on_missing_request() {
    let app = app_with(migrated_db().await);
    let voter = MockSession::new("voter", "voter@x.com");
    send(&app, Method::GET, "/api/me", Some(&voter), None).await;

    let uri = "/api/feature-requests/missing/votes";
    let (status, body) = send(&app, Method::POST, uri, Some(&voter), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "FEATURE_REQUEST_NOT_FOUND");
}

#[tokio::test]
async fn should_record_metric_for_session_user() {
    let app = app_with(migrated_db().await);
    let session = MockSession::new("u1", "a@x.com");
    send(&app, Method::GET, "/api/me", Some(&session), None).await;

    let body = json!({ "name": "page_view", "value": 3, "tags": { "path": "/pricing" } });
    let (status, _) = send(&app, Method::POST, "/api/metrics", Some(&session), Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn should_return_latest_subscription() {
    let db = migrated_db().await;
    let app = app_with(db.clone());
    let session = MockSession::new("u1", "a@x.com");

    let (status, body) = send(&app, Method::GET, "/api/subscription", Some(&session), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "SUBSCRIPTION_NOT_FOUND");

    send(&app, Method::GET, "/api/me", Some(&session), None).await;
    DbSubscriptionRepository { db }
        .upsert_by_stripe_id(SubscriptionSnapshot {
            user_id: "u1".into(),
            stripe_customer_id: "cus_1".into(),
            stripe_subscription_id: "sub_1".into(),
            status: SubscriptionStatus::PastDue,
            price_id: "price_pro".into(),
            current_period_end: None,
            cancel_at_period_end: false,
        })
        .await
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/api/subscription", Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "past_due");
    assert_eq!(body["entitled"], true);
    assert_eq!(body["currentPeriodEnd"], serde_json::Value::Null);
}
