#![allow(dead_code)]

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use trackr_api::auth::{generate_jwt, Claims};
use trackr_api::config::{AppConfig, StorageBackend};
use trackr_api::database::models::{Activity, Routine, RoutineActivity};
use trackr_api::database::{Fixture, MemoryRepository, RoutineActivityRepository};
use trackr_api::types::DbId;
use trackr_api::{app, AppState};

pub const TEST_SECRET: &str = "trackr-test-secret";

/// Owns routine 1
pub const ALBERT: DbId = 5;
/// Owns routine 2
pub const SANDRA: DbId = 9;
/// Owns nothing
pub const GLAMGAL: DbId = 3;

/// Two routines, three activities, two routine activities:
/// 7 (routine 2, owned by SANDRA) and 8 (routine 1, owned by ALBERT)
pub fn fixture() -> Fixture {
    Fixture {
        routines: vec![Routine::new(1, ALBERT, "Leg day"), Routine::new(2, SANDRA, "Cardio")],
        activities: vec![
            Activity::new(2, "squats"),
            Activity::new(3, "running"),
            Activity::new(4, "plank"),
        ],
        routine_activities: vec![
            RoutineActivity {
                id: 7,
                routine_id: 2,
                activity_id: 3,
                count: 10,
                duration: 30,
            },
            RoutineActivity {
                id: 8,
                routine_id: 1,
                activity_id: 3,
                count: 5,
                duration: 60,
            },
        ],
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.backend = StorageBackend::Memory;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

/// Router over a fresh in-memory store seeded with `fixture()`
pub fn build_test_app() -> Router {
    let repo = MemoryRepository::from_fixture(fixture()).expect("fixture should seed");
    build_app_with(Arc::new(repo))
}

/// Router over any repository, for exercising storage behaviour the memory
/// store cannot produce
pub fn build_app_with(repo: Arc<dyn RoutineActivityRepository>) -> Router {
    app(AppState::new(repo, test_config()))
}

pub fn token_for(user_id: DbId) -> String {
    let claims = Claims::new(user_id, format!("user{}", user_id), 1).expect("valid test claims");
    generate_jwt(&claims, TEST_SECRET).expect("failed to sign test token")
}

/// Drive one request through the router and parse the JSON reply
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Ids in a list response, in response order
pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("list response should be an array")
        .iter()
        .filter_map(|record| record["id"].as_i64())
        .collect()
}

// --- Spawned server -------------------------------------------------------

/// A `trackr-api` process on its own port and fixture. The process is killed
/// when the handle drops, including when the owning test panics.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
    _fixture: NamedTempFile,
}

impl TestServer {
    /// Spawn the server binary and wait until `/health` answers
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut fixture_file = NamedTempFile::new().context("failed to create fixture file")?;
        fixture_file.write_all(serde_json::to_string(&fixture())?.as_bytes())?;
        fixture_file.flush()?;

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_trackr-api"));
        cmd.env("APP_ENV", "development")
            .env("TRACKR_API_HOST", "127.0.0.1")
            .env("TRACKR_API_PORT", port.to_string())
            .env("STORAGE_BACKEND", "memory")
            .env("MEMORY_FIXTURE", fixture_file.path())
            .env("JWT_SECRET", TEST_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
            _fixture: fixture_file,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
