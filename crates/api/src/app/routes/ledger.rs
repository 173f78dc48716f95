//! Money movement routes.
//!
//! All three require a verified token (middleware). Withdraw and transfer
//! additionally require the token to own the debited account; deposits may
//! credit any existing account.

use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};

use ferrobank_core::AccountId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub async fn deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DepositRequest>,
) -> axum::response::Response {
    let to = AccountId::from(body.to_account);
    match services.engine().deposit(to, body.amount).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "toAccount": to, "deposited": body.amount })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::WithdrawRequest>,
) -> axum::response::Response {
    let from = AccountId::from(body.from_account);
    let account = match common::load_owned_account(&services, &caller, from).await {
        Ok(account) => account,
        Err(resp) => return resp,
    };

    match services.engine().withdraw(account.id, body.amount).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "fromAccount": account.id, "withdrawn": body.amount })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::TransferRequest>,
) -> axum::response::Response {
    let from = AccountId::from(body.from_account);
    let to = AccountId::from(body.to_account);
    let sender = match common::load_owned_account(&services, &caller, from).await {
        Ok(account) => account,
        Err(resp) => return resp,
    };

    match services.engine().transfer(sender.id, to, body.amount).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "fromAccount": sender.id,
                "toAccount": to,
                "transferred": body.amount,
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
