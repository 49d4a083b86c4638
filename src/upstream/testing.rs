//! In-process upstreams for unit tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use tokio::net::TcpListener;

#[derive(Default)]
struct Recorded {
    bodies: Vec<Bytes>,
    content_types: Vec<String>,
}

/// An upstream answering every request with a fixed status and body.
pub(crate) struct MockUpstream {
    addr: SocketAddr,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockUpstream {
    pub(crate) fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub(crate) fn hits(&self) -> usize {
        self.recorded.lock().unwrap().bodies.len()
    }

    pub(crate) fn received(&self) -> Vec<Bytes> {
        self.recorded.lock().unwrap().bodies.clone()
    }

    pub(crate) fn content_types(&self) -> Vec<String> {
        self.recorded.lock().unwrap().content_types.clone()
    }
}

pub(crate) async fn mock_upstream(status: StatusCode, body: &'static str) -> MockUpstream {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let sink = recorded.clone();

    let app = Router::new().fallback(move |headers: HeaderMap, received: Bytes| {
        let sink = sink.clone();
        async move {
            {
                let mut recorded = sink.lock().unwrap();
                recorded.bodies.push(received);
                if let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
                    recorded.content_types.push(value.to_string());
                }
            }
            (status, body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, recorded }
}

/// URL of an upstream that waits `delay` before answering 200.
pub(crate) async fn slow_upstream(delay: Duration) -> String {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "late"
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/", addr)
}

/// URL of a local port nothing listens on.
pub(crate) async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
