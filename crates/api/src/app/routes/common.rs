//! Shared handler helpers.

use axum::response::Response;

use ferrobank_auth::authorize_account_access;
use ferrobank_core::{Account, AccountId, LedgerError};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::CallerContext;

/// Load `id` and require the caller's token to be bound to it.
///
/// Fails closed: a missing account and a valid token for some *other*
/// account both come back as the same opaque denial.
pub async fn load_owned_account(
    services: &AppServices,
    caller: &CallerContext,
    id: AccountId,
) -> Result<Account, Response> {
    let account = match services.engine().account(id).await {
        Ok(account) => account,
        Err(LedgerError::NotFound(_)) => return Err(errors::access_denied()),
        Err(e) => return Err(errors::ledger_error_to_response(e)),
    };

    if authorize_account_access(caller.claims(), &account).is_err() {
        return Err(errors::access_denied());
    }
    Ok(account)
}
