//! HTTP API for lifetime progress
//!
//! Endpoints:
//! - POST /api/save-progress - Add a bloom count to a user's total
//! - GET /api/progress/:user_id - Read a user's record
//! - GET /health - Health check

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::core::progress::{ProgressStore, UserProgress};
use crate::types::ProgressError;

/// App state
pub struct AppState {
    pub store: RwLock<ProgressStore>,
}

/// Save progress request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    pub user_id: String,
    pub count: u64,
}

/// Save progress response
#[derive(Debug, Serialize)]
pub struct SaveProgressResponse {
    pub success: bool,
    pub data: UserProgress,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Failure mapped onto a status and an `{"error"}` body
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal,
}

impl From<ProgressError> for ApiError {
    fn from(e: ProgressError) -> Self {
        match e {
            ProgressError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Create the API router over a fresh seeded store
pub fn create_router() -> Router {
    create_router_with(ProgressStore::seeded())
}

/// Create the API router over a given store
pub fn create_router_with(store: ProgressStore) -> Router {
    let state = Arc::new(AppState {
        store: RwLock::new(store),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/save-progress", post(save_progress))
        .route("/api/progress/:user_id", get(get_progress))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        users: store.len(),
    })
}

/// Add a bloom count to a user's lifetime total
async fn save_progress(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveProgressRequest>, JsonRejection>,
) -> Result<Json<SaveProgressResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection, "unreadable save-progress body");
        ApiError::Internal
    })?;

    let mut store = state.store.write().await;
    let data = store.submit_progress(&req.user_id, req.count)?;

    Ok(Json(SaveProgressResponse { success: true, data }))
}

/// Read a user's record
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProgress>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_progress(&user_id)?))
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "progress API listening");
    println!("🪄 Magic Stick progress API running on {}", addr);
    println!("  POST /api/save-progress     - Add blooms to a user");
    println!("  GET  /api/progress/:user_id - Get a user's record");
    println!("  GET  /health                - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
