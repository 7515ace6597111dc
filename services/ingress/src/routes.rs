//! RPC Routes
//!
//! Exposes the gateway as tRPC-style procedures over HTTP.
//!
//! Success bodies are `{"result": {"data": ...}}`; failures are
//! `{"error": {"code", "message", "httpStatus", "issues"}}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::IngressError;
use crate::ingress::{CreateIngressRequest, IngressGateway};

pub const HEALTH_PATH: &str = "/health";
pub const CREATE_PATH: &str = "/api/trpc/ingress.create";
pub const DELETE_ALL_PATH: &str = "/api/trpc/ingress.deleteAll";
pub const LIST_PATH: &str = "/api/trpc/ingress.list";

#[derive(Clone)]
struct AppState {
    gateway: IngressGateway,
}

pub fn build_router(gateway: IngressGateway) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(CREATE_PATH, post(create_ingress))
        .route(DELETE_ALL_PATH, post(delete_all_ingress))
        .route(LIST_PATH, get(list_ingress))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { gateway })
}

// --- Error mapping ---

enum AppError {
    Ingress(IngressError),
    MalformedBody(String),
}

impl From<IngressError> for AppError {
    fn from(err: IngressError) -> Self {
        Self::Ingress(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, issues) = match self {
            AppError::MalformedBody(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message, json!([]))
            }
            AppError::Ingress(IngressError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                errors.to_string(),
                json!(errors.issues()),
            ),
            AppError::Ingress(IngressError::Service(err)) => {
                error!(error = %err, "LiveKit call failed");
                (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", err.to_string(), json!([]))
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "code": code,
                    "message": message,
                    "httpStatus": status.as_u16(),
                    "issues": issues,
                }
            })),
        )
            .into_response()
    }
}

type RpcResult = Result<Json<serde_json::Value>, AppError>;

fn data(value: impl serde::Serialize) -> Json<serde_json::Value> {
    Json(json!({ "result": { "data": value } }))
}

// --- Handlers ---

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "lornu-ingress",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn create_ingress(
    State(state): State<AppState>,
    payload: Result<Json<CreateIngressRequest>, JsonRejection>,
) -> RpcResult {
    let Json(request) = payload.map_err(|e| AppError::MalformedBody(e.body_text()))?;
    let ingress = state.gateway.create(&request).await?;
    Ok(data(ingress))
}

async fn delete_all_ingress(State(state): State<AppState>) -> RpcResult {
    state.gateway.delete_all().await?;
    Ok(data(serde_json::Value::Null))
}

async fn list_ingress(State(state): State<AppState>) -> RpcResult {
    let ingresses = state.gateway.list().await?;
    Ok(data(ingresses))
}
