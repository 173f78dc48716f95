//! Request payloads and JSON mapping helpers.
//!
//! Wire field names are part of the API contract and use camelCase
//! throughout; account ids appear as plain integers in bodies.

use serde::Deserialize;
use serde_json::json;

use ferrobank_core::Account;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub to_account: i64,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub from_account: i64,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: i64,
    pub to_account: i64,
    pub amount: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Create-account response: the persisted record plus the bearer token that
/// grants access to it.
pub fn created_account_json(account: &Account, token: &str) -> serde_json::Value {
    json!({
        "account": account,
        "token": token,
    })
}
