use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Request identity attached by the authorization gate.
///
/// Lives only for the duration of the request. The email is the denormalized
/// claim baked into the token at issuance, not an authoritative lookup.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: Option<String>,
}

/// Authorization gate applied to every protected route.
///
/// Extracts the bearer token, validates it, and attaches the resolved
/// identity to the request. Validation failures all surface as the same
/// "invalid token" response; the distinction lives in the log only.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.token_validator.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "token rejected");
        unauthorized("invalid token")
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "token subject is not an account id");
        unauthorized("invalid token")
    })?;

    let email = claims.email();

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id, email });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("authorization header is required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("invalid authorization header format"))?;

    // Exactly two space-delimited parts with the Bearer scheme.
    let parts: Vec<&str> = auth_str.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(unauthorized("invalid authorization header format"));
    }

    Ok(parts[1])
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
