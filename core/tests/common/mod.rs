//! In-process stand-in for a SOAR instance.
//!
//! Records every request it sees and answers all of them with one canned
//! status and body, optionally after a delay.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

use soar_core::{Config, Dispatcher, SoarClient};

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct FakeState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

pub struct FakeSoar {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeSoar {
    /// Starts a fake that answers every request with `status` and `body`.
    pub async fn start(status: u16, body: &'static str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Like [`FakeSoar::start`], but holds each response back for `delay`.
    pub async fn start_delayed(status: u16, body: &'static str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            requests: requests.clone(),
            status: StatusCode::from_u16(status).expect("status"),
            body,
            delay,
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn only_request(&self) -> Recorded {
        let reqs = self.requests();
        assert_eq!(reqs.len(), 1, "expected exactly one request, got {reqs:?}");
        reqs.into_iter().next().expect("one")
    }

    pub fn dispatcher(&self) -> Dispatcher {
        dispatcher_for(&self.base_url)
    }
}

async fn record(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.requests.lock().expect("lock").push(Recorded {
        method: method.to_string(),
        uri: uri.to_string(),
        token: header_str("ph-auth-token"),
        content_type: header_str("content-type"),
        body,
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

pub fn dispatcher_for(base_url: &str) -> Dispatcher {
    dispatcher_with_timeout(base_url, soar_core::DEFAULT_TIMEOUT)
}

pub fn dispatcher_with_timeout(base_url: &str, timeout: Duration) -> Dispatcher {
    let config = Config::new(Some(base_url.to_string()), Some(TOKEN.to_string()))
        .with_timeout(timeout);
    Dispatcher::new(SoarClient::new(config).expect("client"))
}

/// A base URL on which nothing is listening.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
