use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::pipeline::DashboardBundle;
use crate::server::{api, page, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/indicators", get(indicators))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    match build_bundle(&state).await {
        Ok(bundle) => Html(page::render_dashboard(&bundle)).into_response(),
        Err(message) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &message),
    }
}

async fn dashboard(State(state): State<AppState>) -> Response {
    match build_bundle(&state).await {
        Ok(bundle) => Json(bundle).into_response(),
        Err(message) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &message),
    }
}

async fn health() -> Response {
    Json(api::health_payload()).into_response()
}

async fn indicators() -> Response {
    Json(api::indicators_payload()).into_response()
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Every build recomputes the full dataset on the blocking pool.
async fn build_bundle(state: &AppState) -> Result<DashboardBundle, String> {
    let dashboard = Arc::clone(&state.dashboard);
    tokio::task::spawn_blocking(move || dashboard.build())
        .await
        .map_err(|err| {
            error!(error = %err, "dashboard build task failed");
            format!("dashboard build failed: {err}")
        })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(api::error_payload(message))).into_response()
}
