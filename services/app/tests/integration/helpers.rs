use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt as _;

use shipkit_app::domain::repository::UserRepository;
use shipkit_app::domain::types::{NewUser, User};
use shipkit_app::infra::connection::{Connector, LazyDatabase, UrlSource};
use shipkit_app::infra::db::DbUserRepository;
use shipkit_app::router::build_router;
use shipkit_app::state::AppState;
use shipkit_migration::Migrator;
use shipkit_testing::session::MockSession;

pub const SQLITE_MEMORY: &str = "sqlite::memory:";

// ── Databases ────────────────────────────────────────────────────────────────

/// Fresh private in-memory database. A single pooled connection keeps every
/// query on the same SQLite memory instance.
pub async fn open_memory_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(SQLITE_MEMORY);
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await
}

pub async fn migrated_db() -> DatabaseConnection {
    let db = open_memory_db().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn insert_user(db: &DatabaseConnection, email: &str) -> User {
    DbUserRepository { db: db.clone() }
        .create(NewUser {
            email: email.into(),
            ..Default::default()
        })
        .await
        .unwrap()
}

// ── Connection manager doubles ───────────────────────────────────────────────

/// Connection string that tests can set or clear at runtime.
#[derive(Clone, Default)]
pub struct SharedUrl(Arc<Mutex<Option<String>>>);

impl SharedUrl {
    pub fn set(&self, url: Option<&str>) {
        *self.0.lock().unwrap() = url.map(str::to_owned);
    }
}

impl UrlSource for SharedUrl {
    fn database_url(&self) -> Option<String> {
        self.0.lock().unwrap().clone()
    }

    fn setting_name(&self) -> &str {
        "DATABASE_URL"
    }
}

/// Opens in-memory SQLite after a delay and counts how often it was asked to.
pub struct CountingConnector {
    pub opened: AtomicUsize,
    pub delay: Duration,
}

impl CountingConnector {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            opened: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl Connector for CountingConnector {
    async fn connect(&self, _url: &str) -> Result<DatabaseConnection, DbErr> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        open_memory_db().await
    }
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

pub fn app_with(db: DatabaseConnection) -> Router {
    app_with_lazy(LazyDatabase::from_connection(db))
}

pub fn app_with_lazy(db: LazyDatabase) -> Router {
    build_router(AppState::new(Arc::new(db)))
}

/// Send one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<&MockSession>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        for (name, value) in session.headers().iter() {
            builder = builder.header(name, value);
        }
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
