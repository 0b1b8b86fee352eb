use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use shipkit_core::health::healthz;
use shipkit_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    billing::get_subscription,
    feature_request::{create_feature_request, list_feature_requests, unvote, vote},
    health::{health, readyz},
    metric::record_metric,
    profile::{delete_me, get_me},
    setup::check_env,
    waitlist::join_waitlist,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/health", get(health))
        // Setup
        .route("/api/check-env", get(check_env))
        // Waitlist
        .route("/api/waitlist", post(join_waitlist))
        // Profile
        .route("/api/me", get(get_me).delete(delete_me))
        // Feature requests
        .route(
            "/api/feature-requests",
            get(list_feature_requests).post(create_feature_request),
        )
        .route(
            "/api/feature-requests/{id}/votes",
            post(vote).delete(unvote),
        )
        // Metrics
        .route("/api/metrics", post(record_metric))
        // Billing
        .route("/api/subscription", get(get_subscription))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
