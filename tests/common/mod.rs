//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vless_manager::config::ManagerConfig;
use vless_manager::lifecycle::startup::build_manager;
use vless_manager::reload::{ReloadError, ReloadTrigger};
use vless_manager::HttpServer;

/// Reload trigger that records calls instead of touching a real proxy.
#[derive(Default)]
pub struct RecordingReloader {
    calls: AtomicUsize,
    finished: AtomicUsize,
    fail: AtomicBool,
    delay_ms: AtomicU64,
}

impl RecordingReloader {
    /// Reloads started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reloads that ran to the end.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReloadTrigger for RecordingReloader {
    async fn reload(&self) -> Result<(), ReloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ReloadError::Failed {
                command: "systemctl reload xray".into(),
                status: "exit status: 1".into(),
                stderr: "Job for xray.service failed.".into(),
            });
        }
        Ok(())
    }
}

/// A manager wired to a temp document and a recording reloader.
pub struct TestApp {
    pub dir: TempDir,
    pub path: PathBuf,
    pub reloader: Arc<RecordingReloader>,
    pub config: ManagerConfig,
    pub router: Router,
}

impl TestApp {
    /// Current document on disk.
    pub async fn document(&self) -> Value {
        let bytes = tokio::fs::read(&self.path).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// The `clients` array of the first inbound.
    pub async fn clients(&self) -> Vec<Value> {
        self.document().await["inbounds"][0]["settings"]["clients"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }
}

/// Typical single-inbound VLESS document.
pub fn vless_document(clients: Value) -> Value {
    serde_json::json!({
        "log": { "loglevel": "warning" },
        "inbounds": [ {
            "port": 443,
            "protocol": "vless",
            "settings": { "clients": clients, "decryption": "none" },
            "streamSettings": {
                "network": "tcp",
                "security": "tls",
                "tlsSettings": { "certificates": [ { "certificateFile": "/etc/xray/cert.pem" } ] }
            }
        } ],
        "outbounds": [ { "protocol": "freedom", "tag": "direct" } ]
    })
}

pub async fn spawn_app(document: Value) -> TestApp {
    spawn_app_with(document, |_| {}).await
}

pub async fn spawn_app_with(document: Value, tweak: impl FnOnce(&mut ManagerConfig)) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, serde_json::to_vec_pretty(&document).unwrap())
        .await
        .unwrap();

    let mut config = ManagerConfig::default();
    config.xray.config_path = path.to_string_lossy().into_owned();
    config.xray.server_ip = "203.0.113.10".to_string();
    config.xray.server_port = 8443;
    tweak(&mut config);

    let reloader = Arc::new(RecordingReloader::default());
    let manager = Arc::new(build_manager(&config, reloader.clone()));
    let router = HttpServer::new(config.clone(), manager).router();

    TestApp {
        dir,
        path,
        reloader,
        config,
        router,
    }
}

/// Send a request through the router and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub fn create_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/create-user")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn list_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(query: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/api/delete-user{query}"))
        .body(Body::empty())
        .unwrap()
}
