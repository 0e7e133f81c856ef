#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use sqlx::AnyPool;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use centro_api::db::{self, Dialect};
use centro_api::router::{AppState, centro_router};

/// A throwaway SQLite file, removed on drop.
pub struct TestDb {
    pub path: PathBuf,
    pub pool: AnyPool,
    pub dialect: Dialect,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

pub fn temp_db_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "centro-{}-{}-{}.sqlite",
        label,
        std::process::id(),
        nanos
    ));
    path
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

/// Fresh database without any tables.
pub async fn empty_db(label: &str) -> TestDb {
    let path = temp_db_path(label);
    let (pool, dialect) = db::connect_lazy(&sqlite_url(&path)).expect("failed to build pool");
    TestDb {
        path,
        pool,
        dialect,
    }
}

/// Fresh database with `usuarios` and `grupos` created.
pub async fn ready_db(label: &str) -> TestDb {
    let test_db = empty_db(label).await;
    db::init_schema(&test_db.pool, test_db.dialect)
        .await
        .expect("schema init failed");
    test_db
}

pub fn app(test_db: &TestDb) -> Router {
    centro_router(AppState::new(test_db.pool.clone(), test_db.dialect))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body was not json")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body was not utf-8")
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    dispatch(app, request).await
}

pub async fn send_form(app: &Router, method: &str, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("failed to build request");

    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(request).await.expect("request failed");
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec();
    TestResponse {
        status,
        content_type,
        body,
    }
}
