//! Route modules and the shared success envelope.

pub mod credentials;
pub mod universities;

use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Runs a registry call on the blocking pool.
///
/// Journal-backed writes hold the registry lock through the append and, with
/// `UNICRED_JOURNAL_SYNC`, an fsync; none of that may stall a runtime worker.
pub(crate) async fn blocking<T, F>(state: &AppState, call: F) -> Result<T, AppError>
where
    F: FnOnce(&AppState) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || call(&state))
        .await
        .map_err(|e| AppError::Internal(format!("registry task failed: {e}")))?
}

/// Success body: `{"success": true, "message"?: ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Always `true`.
    pub success: bool,
    /// Optional confirmation text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// Payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps `data` without a message.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Wraps `data` with a confirmation message.
    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}
