//! Axum router for the `/api/*` surface: `POST /api/flows/{id}/run`,
//! `GET /api/jobs/{id}`, `GET /api/ping`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;

use oj_core::application::{Engine, EngineError};

use crate::dto::{JobDto, PingDto};

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/flows/{id}/run", post(run_flow))
        .route("/api/jobs/{id}", get(get_job))
        .with_state(state)
}

async fn ping() -> impl IntoResponse {
    Json(PingDto { message: "pong" })
}

async fn run_flow(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.engine.start_job(&id).await {
        Ok(job_id) => (StatusCode::OK, Json(JobDto::pending(job_id, id))).into_response(),
        Err(EngineError::FlowNotFound(_)) => {
            (StatusCode::NOT_FOUND, "Flow not found").into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn get_job(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.engine.get_job(&id).await {
        Some(job) => (StatusCode::OK, Json(JobDto::from(job))).into_response(),
        None => (StatusCode::NOT_FOUND, "Job not found").into_response(),
    }
}
