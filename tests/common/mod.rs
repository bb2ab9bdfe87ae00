//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use qr_service::config::ServiceConfig;
use qr_service::http::server::build_router;
use qr_service::qr::{EncodeError, ImageEncoder, RecoveryLevel};
use qr_service::AppState;
use tower::ServiceExt;

/// Bytes returned by a succeeding [`FakeEncoder`].
#[allow(dead_code)]
pub const FAKE_IMAGE: &[u8] = b"fake-png-bytes";

/// A single recorded call to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCall {
    pub payload: Vec<u8>,
    pub level: RecoveryLevel,
    pub size: u32,
}

/// Deterministic encoder that records its calls.
#[derive(Clone, Default)]
pub struct FakeEncoder {
    fail: bool,
    calls: Arc<Mutex<Vec<EncodeCall>>>,
}

#[allow(dead_code)]
impl FakeEncoder {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageEncoder for FakeEncoder {
    fn encode(&self, payload: &[u8], level: RecoveryLevel, size: u32) -> Result<Vec<u8>, EncodeError> {
        self.calls.lock().unwrap().push(EncodeCall {
            payload: payload.to_vec(),
            level,
            size,
        });
        if self.fail {
            Err(EncodeError::Symbol(qrcode::types::QrError::DataTooLong))
        } else {
            Ok(FAKE_IMAGE.to_vec())
        }
    }
}

/// Router wired to the given state with default config.
pub fn app(state: AppState) -> Router {
    build_router(&ServiceConfig::default(), state)
}

/// A collected response.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// Send a request through the router without a network listener.
#[allow(dead_code)]
pub async fn send(app: Router, method: Method, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

/// GET `uri` through the router.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, &[]).await
}
