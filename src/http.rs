//! HTTP transport for the relocation engine.
//!
//! `POST /api/filemove` takes `{ "searchDirectory", "destinationDirectory" }`
//! and answers with the move summary. Setup errors map to 400 with a
//! `message`, as does a body that is not a readable request; anything
//! unexpected maps to a generic 500.
//!
//! Relocations block on disk I/O, so each one runs on tokio's blocking pool.

use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::model::{MoveRequest, MoveSummary};
use crate::relocate::Relocator;

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred while moving the files.";

pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body: `{ "message": ..., "errors"?: { field: [..] } }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: BTreeMap<&'static str, Vec<&'static str>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.errors.is_empty() {
            json!({ "message": self.message })
        } else {
            json!({ "message": self.message, "errors": self.errors })
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    relocator: Arc<Relocator>,
}

/// Build the router around a shared engine.
pub fn router(relocator: Arc<Relocator>) -> Router {
    Router::new()
        .route("/api/filemove", post(move_files))
        .route("/health", get(health))
        .with_state(AppState { relocator })
}

async fn health() -> &'static str {
    "ok"
}

async fn move_files(
    State(state): State<AppState>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<Json<MoveSummary>> {
    let Json(request) = body.map_err(|rejection| {
        warn!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Unreadable request body"
        );
        ApiError::bad_request(rejection.body_text())
    })?;
    let issues = request.validate();
    if !issues.is_empty() {
        let mut err = ApiError::bad_request("One or more validation errors occurred.");
        for issue in issues {
            err.errors.entry(issue.field).or_default().push(issue.message);
        }
        return Err(err);
    }

    let relocator = Arc::clone(&state.relocator);
    let job = request.clone();
    let outcome = tokio::task::spawn_blocking(move || relocator.move_all(&job)).await;

    match outcome {
        Ok(Ok(summary)) => Ok(Json(summary)),
        Ok(Err(e)) => {
            warn!(
                code = e.code(),
                kind = e.kind(),
                search = request.search_directory(),
                destination = request.destination_directory(),
                error = %e,
                "Relocation rejected"
            );
            Err(ApiError::bad_request(e.to_string()))
        }
        Err(join_err) => {
            error!(
                search = request.search_directory(),
                destination = request.destination_directory(),
                error = %join_err,
                "Relocation worker failed"
            );
            Err(ApiError::internal(UNEXPECTED_ERROR_MESSAGE))
        }
    }
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, relocator: Relocator) -> anyhow::Result<()> {
    let app = router(Arc::new(relocator));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
