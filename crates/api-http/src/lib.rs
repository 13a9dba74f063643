//! HTTP API layer: the `/api/*` JSON routes plus a minimal dashboard,
//! both built on axum over the `oj-core` engine façade.

pub mod dashboard;
pub mod dto;
pub mod routes;

pub use routes::ApiState;

use axum::Router;

/// The combined router: API routes merged with the dashboard.
pub fn app(state: ApiState) -> Router {
    routes::router(state.clone()).merge(dashboard::router(state))
}
