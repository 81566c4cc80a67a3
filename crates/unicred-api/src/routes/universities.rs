//! University registration and authority review.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use unicred_core::{
    AuthorityAction, Region, RegistrationCandidate, UniversityRecord, UniversityType,
    VerificationStatus,
};
use unicred_store::{register, AndFilter, RegionFilter, StatusFilter, TypeFilter};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_id, extract_json};
use crate::routes::{blocking, Envelope};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/universities",
            post(register_university).get(list_universities),
        )
        .route("/v1/universities/:id", get(get_university))
        .route("/v1/universities/:id/approve", post(approve_university))
        .route("/v1/universities/:id/reject", post(reject_university))
}

/// POST /v1/universities: Submit a registration.
///
/// Runs the same validator as the CLI pre-flight, then the duplicate check
/// and the store insert. New records start PENDING.
async fn register_university(
    State(state): State<AppState>,
    body: Result<Json<RegistrationCandidate>, JsonRejection>,
) -> Result<Json<Envelope<UniversityRecord>>, AppError> {
    let candidate = extract_json(body)?;
    let record = blocking(&state, move |s| Ok(register(s.store.as_ref(), &candidate)?)).await?;
    Ok(Json(Envelope::with_message(
        "University registered successfully",
        record,
    )))
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    status: Option<String>,
    state: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// GET /v1/universities: List registrations, newest first.
async fn list_universities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<UniversityRecord>>>, AppError> {
    let mut filter = AndFilter::default();
    if let Some(status) = &query.status {
        let status: VerificationStatus = status
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown status '{status}'")))?;
        filter = filter.with(StatusFilter(status));
    }
    if let Some(region) = &query.state {
        let region: Region = region
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown state '{region}'")))?;
        filter = filter.with(RegionFilter(region));
    }
    if let Some(kind) = &query.kind {
        let kind: UniversityType = kind
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown university type '{kind}'")))?;
        filter = filter.with(TypeFilter(kind));
    }

    let records = blocking(&state, move |s| Ok(s.store.universities(&filter)?)).await?;
    Ok(Json(Envelope::new(records)))
}

/// GET /v1/universities/:id
async fn get_university(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Envelope<UniversityRecord>>, AppError> {
    let id = extract_id(id)?;
    let record = blocking(&state, move |s| Ok(s.store.university(id)?))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("University {id} not found")))?;
    Ok(Json(Envelope::new(record)))
}

/// POST /v1/universities/:id/approve
async fn approve_university(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Envelope<UniversityRecord>>, AppError> {
    decide(&state, extract_id(id)?, AuthorityAction::Approve).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RejectRequest {
    reason: String,
}

/// POST /v1/universities/:id/reject: Body `{"reason": "..."}`.
async fn reject_university(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<RejectRequest>, JsonRejection>,
) -> Result<Json<Envelope<UniversityRecord>>, AppError> {
    let id = extract_id(id)?;
    let RejectRequest { reason } = extract_json(body)?;
    decide(&state, id, AuthorityAction::Reject { reason }).await
}

async fn decide(
    state: &AppState,
    id: Uuid,
    action: AuthorityAction,
) -> Result<Json<Envelope<UniversityRecord>>, AppError> {
    let name = action.name();
    let record = blocking(state, move |s| Ok(s.store.decide(id, &action)?)).await?;
    tracing::info!(%id, action = name, status = %record.verification_status, "registration decided");
    Ok(Json(Envelope::new(record)))
}
