//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::Router;
use relay_service::lifecycle::{Relay, RelayError, Shutdown};
use relay_service::RelayConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A mock upstream that answers with a fixed status and records request bodies.
pub struct RecordingBackend {
    pub addr: SocketAddr,
    bodies: Arc<Mutex<Vec<Bytes>>>,
}

#[allow(dead_code)]
impl RecordingBackend {
    pub fn url(&self) -> String {
        format!("http://{}/ingest", self.addr)
    }

    pub fn bodies(&self) -> Vec<Bytes> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Start a mock upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn start_recording_backend(status: u16, response: &'static str) -> RecordingBackend {
    let status = StatusCode::from_u16(status).unwrap();
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let sink = bodies.clone();

    let app = Router::new().fallback(move |body: Bytes| {
        let sink = sink.clone();
        async move {
            sink.lock().unwrap().push(body);
            (status, response)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    RecordingBackend { addr, bodies }
}

/// Start a backend that accepts connections and closes them without answering.
#[allow(dead_code)]
pub async fn start_dropping_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    addr
}

/// A local address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A relay started on an ephemeral port.
pub struct RunningRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), RelayError>>,
}

#[allow(dead_code)]
impl RunningRelay {
    pub fn receive_url(&self) -> String {
        format!("http://{}/api/receive", self.addr)
    }

    /// Trigger shutdown and wait for the relay to exit.
    pub async fn stop(self) -> Result<(), RelayError> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("relay did not stop")
            .expect("relay task panicked")
    }
}

pub async fn start_relay(config: RelayConfig) -> RunningRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let relay = Relay::new(config).unwrap();
    let shutdown = Shutdown::new();
    let task = tokio::spawn(relay.run(listener, shutdown.subscribe()));

    RunningRelay {
        addr,
        shutdown,
        task,
    }
}

/// Config forwarding to `forward_url` with polling disabled.
#[allow(dead_code)]
pub fn forward_only(forward_url: String) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.forward.target_url = forward_url;
    config.poller.enabled = false;
    config
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
