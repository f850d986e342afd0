use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::types::DbId;

const LOGIN_REQUIRED: &str = "You must be logged in to perform this action";

/// The authenticated caller, taken from a verified JWT.
///
/// Using it as a handler argument is what makes a route protected: the
/// request is rejected with `MissingUserError` before the handler body runs.
#[derive(Clone, Debug, Serialize)]
pub struct Principal {
    pub id: DbId,
    pub username: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        // Extract JWT from Authorization header
        let token = extract_jwt_from_headers(&parts.headers).map_err(|msg| {
            tracing::warn!("Rejected request without usable credentials: {}", msg);
            ApiError::missing_user(LOGIN_REQUIRED)
        })?;

        // Validate and decode JWT
        let claims = validate_jwt(&token, &state.config.security.jwt_secret).map_err(|e| {
            tracing::warn!("Rejected request with invalid token: {}", e);
            ApiError::missing_user(LOGIN_REQUIRED)
        })?;

        let principal = Principal::from(claims);
        tracing::debug!("Authenticated user {} ({})", principal.username, principal.id);

        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
