//! # unicred-api
//!
//! HTTP surface for university registration, authority review and
//! credential issuance.
//!
//! ## Routes
//!
//! - `POST /v1/universities` (authoritative registration)
//! - `GET /v1/universities[?status=&state=&type=]`, `GET /v1/universities/:id`
//! - `POST /v1/universities/:id/approve`, `POST /v1/universities/:id/reject`
//! - `POST /v1/credentials`, `GET /v1/credentials`, `GET /v1/credentials/:hash`
//! - `POST /v1/credentials/verify`
//! - `GET /health/liveness`, `GET /health/readiness`

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use unicred_store::AllRecords;

use crate::state::AppState;

/// Builds the router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::universities::router())
        .merge(routes::credentials::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Browser clients post registrations from other origins.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match routes::blocking(&state, |s| Ok(s.store.universities(&AllRecords)?)).await {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(err) => {
            tracing::warn!(error = %err, "registry not ready");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
    }
}
