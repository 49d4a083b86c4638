//! `POST /api/receive`: validate the JSON body and forward it unchanged.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::upstream::ForwardOutcome;

pub const NO_JSON_MESSAGE: &str = "No JSON data received";
pub const SUCCESS_MESSAGE: &str = "Data sent to target service successfully";
pub const FAILURE_MESSAGE: &str = "Failed to send data";

/// Every response the relay endpoint can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResponse {
    /// 400: body missing or not JSON.
    NoJsonData,
    /// 200: target answered 200.
    Sent,
    /// 500: target answered with another status.
    NotSent,
    /// 500: forwarding failed before a response arrived.
    Error(String),
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let (status, payload) = match self {
            RelayResponse::NoJsonData => (StatusCode::BAD_REQUEST, json!({ "error": NO_JSON_MESSAGE })),
            RelayResponse::Sent => (
                StatusCode::OK,
                json!({ "status": "success", "message": SUCCESS_MESSAGE }),
            ),
            RelayResponse::NotSent => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "error", "message": FAILURE_MESSAGE }),
            ),
            RelayResponse::Error(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "error", "message": format!("Error: {}", detail) }),
            ),
        };

        (status, Json(payload)).into_response()
    }
}

/// Relay handler.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResponse {
    let request_id = request_id(&headers);

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "No JSON data received");
            return RelayResponse::NoJsonData;
        }
    };

    tracing::info!(request_id = %request_id, data = %payload, "Received payload");

    match state.client.forward(&state.forward_url, body).await {
        ForwardOutcome::Delivered { body } => {
            tracing::info!(request_id = %request_id, response = %body, "Forwarded payload to target");
            RelayResponse::Sent
        }
        ForwardOutcome::Rejected { status, body } => {
            tracing::error!(
                request_id = %request_id,
                status = %status,
                response = %body,
                "Target rejected payload"
            );
            RelayResponse::NotSent
        }
        ForwardOutcome::Failed(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Forwarding failed");
            RelayResponse::Error(e.to_string())
        }
    }
}
