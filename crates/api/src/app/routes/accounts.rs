use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use ferrobank_core::AccountId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

/// Open a zero-balance account and hand back the persisted record together
/// with the bearer token bound to its number.
pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    let account = match services
        .engine()
        .open_account(&body.first_name, &body.last_name)
        .await
    {
        Ok(account) => account,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    let token = match services.tokens().issue(account.number, Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("token issuance failed: {e}");
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token issuance failed");
        }
    };

    (
        StatusCode::OK,
        Json(dto::created_account_json(&account, &token)),
    )
        .into_response()
}

pub async fn list_accounts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.engine().accounts().await {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match common::load_owned_account(&services, &caller, AccountId::from(id)).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn delete_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let account = match common::load_owned_account(&services, &caller, AccountId::from(id)).await {
        Ok(account) => account,
        Err(resp) => return resp,
    };

    match services.engine().close_account(account.id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": account.id })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
