//! Request extraction helpers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use uuid::Uuid;

use crate::error::AppError;

/// Unwraps a JSON body, mapping decoder failures to
/// [`AppError::InvalidBody`].
///
/// Missing fields are not decoder failures: request types default them so
/// the validator reports them per field.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::InvalidBody(err.body_text()))
}

/// Unwraps a `:id` path segment.
pub fn extract_id(result: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    result
        .map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("Invalid university id".to_string()))
}
