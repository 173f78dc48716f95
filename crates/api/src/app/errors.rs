use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ferrobank_core::LedgerError;

/// Error body shape used across the API: `{"error": "<message>"}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Opaque 403 used for every authentication/authorization failure, so the
/// response does not reveal whether the target account exists.
pub fn access_denied() -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "access denied")
}

/// Translate a ledger failure into a transport response. Translation is all
/// that happens here; no retries.
pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match &err {
        LedgerError::NotFound(_)
        | LedgerError::SenderNotFound(_)
        | LedgerError::ReceiverNotFound(_) => json_error(StatusCode::NOT_FOUND, err.to_string()),
        LedgerError::InvalidAmount(_)
        | LedgerError::InsufficientFunds(_)
        | LedgerError::SelfTransfer => json_error(StatusCode::BAD_REQUEST, err.to_string()),
        LedgerError::Unauthorized => access_denied(),
        LedgerError::Store(e) => {
            tracing::error!("store failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal store failure")
        }
    }
}
