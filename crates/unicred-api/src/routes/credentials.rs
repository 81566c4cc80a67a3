//! Credential issuance and verification.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use unicred_canonical::{verify_raw, ContentHash, HashVerdict};
use unicred_core::{verify_issued, CredentialData, CredentialVerdict, IssuedCredential};
use unicred_store::issue_credential;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::routes::{blocking, Envelope};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/credentials", post(issue).get(list_credentials))
        .route("/v1/credentials/verify", post(verify))
        .route("/v1/credentials/:hash", get(get_credential))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssueRequest {
    credential: CredentialData,
    wallet_address: String,
}

/// POST /v1/credentials: Canonicalize, hash, anchor and store a credential.
async fn issue(
    State(state): State<AppState>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<Json<Envelope<IssuedCredential>>, AppError> {
    let IssueRequest {
        credential,
        wallet_address,
    } = extract_json(body)?;
    let issued = blocking(&state, move |s| {
        Ok(issue_credential(
            s.store.as_ref(),
            s.ledger.as_ref(),
            &s.canonicalizer,
            credential,
            &wallet_address,
        )?)
    })
    .await?;
    Ok(Json(Envelope::with_message(
        "Credential issued successfully",
        issued,
    )))
}

/// GET /v1/credentials: All issued credentials, newest first.
async fn list_credentials(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<IssuedCredential>>>, AppError> {
    let credentials = blocking(&state, |s| Ok(s.store.credentials()?)).await?;
    Ok(Json(Envelope::new(credentials)))
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    raw_json: String,
    credential_hash: String,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    verdict: HashVerdict,
    /// Whether a credential with this hash was issued here.
    on_record: bool,
}

/// POST /v1/credentials/verify: Check a stored payload against its hash.
async fn verify(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let req = extract_json(body)?;
    let hash = parse_hash(&req.credential_hash)?;
    let verdict = verify_raw(&req.raw_json, &hash, &state.canonicalizer)?;
    let on_record = blocking(&state, move |s| Ok(s.store.credential(&hash)?.is_some())).await?;
    Ok(Json(VerifyResponse { verdict, on_record }))
}

#[derive(Debug, Serialize)]
struct CredentialView {
    #[serde(flatten)]
    credential: IssuedCredential,
    verdict: CredentialVerdict,
}

/// GET /v1/credentials/:hash: A stored credential and its re-verification.
async fn get_credential(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<Envelope<CredentialView>>, AppError> {
    let hash = parse_hash(&hash)?;
    let stored = blocking(&state, {
        let hash = hash.clone();
        move |s| Ok(s.store.credential(&hash)?)
    })
    .await?;
    let credential =
        stored.ok_or_else(|| AppError::NotFound(format!("No credential with hash {hash}")))?;
    let verdict = verify_issued(&credential, &state.canonicalizer)?;
    Ok(Json(Envelope::new(CredentialView {
        credential,
        verdict,
    })))
}

fn parse_hash(value: &str) -> Result<ContentHash, AppError> {
    ContentHash::parse(value.trim()).map_err(|_| {
        AppError::BadRequest("credential_hash must be 64 hexadecimal characters".to_string())
    })
}
