use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Protected route: returns the identity the authorization gate resolved.
pub async fn current_account(
    Extension(identity): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<CurrentAccountResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentAccountResponseData {
            account_id: identity.account_id.to_string(),
            email: identity.email,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAccountResponseData {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
