//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the relay handler
//! - Wire up middleware (tracing, timeout, request ID, panic recovery)
//! - Serve on a listener until shutdown

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::http::relay::{receive, RelayResponse};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::ShutdownSignal;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub forward_url: Arc<str>,
}

impl AppState {
    pub fn new(client: UpstreamClient, forward_url: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            forward_url: forward_url.into(),
        }
    }
}

/// HTTP server for the relay endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState, timeouts: &TimeoutConfig) -> Self {
        Self {
            router: build_router(state, timeouts),
        }
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the relay routes with all middleware layers.
pub fn build_router(state: AppState, timeouts: &TimeoutConfig) -> Router {
    let routes = Router::new()
        .route("/api/receive", post(receive))
        .with_state(state);
    with_middleware(routes, timeouts)
}

#[allow(deprecated)]
fn with_middleware(router: Router, timeouts: &TimeoutConfig) -> Router {
    router
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "request handler panicked".to_string()
    };

    tracing::error!(error = %detail, "Request handler panicked");
    RelayResponse::Error(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn panics_become_error_responses() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let router = with_middleware(
            Router::new().route("/boom", get(boom)),
            &TimeoutConfig::default(),
        );

        let response = router
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload, json!({ "status": "error", "message": "Error: boom" }));
    }

    #[tokio::test]
    async fn only_post_is_routed() {
        let timeouts = TimeoutConfig::default();
        let state = AppState::new(UpstreamClient::new(&timeouts).unwrap(), "http://127.0.0.1:9/");
        let router = build_router(state, &timeouts);

        let response = router
            .clone()
            .oneshot(Request::get("/api/receive").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = router
            .oneshot(Request::post("/other").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
