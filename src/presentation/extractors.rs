use crate::domain::auth::{Principal, TokenError};
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use std::convert::Infallible;

/// Authenticated user extractor.
/// Validates the bearer token from the Authorization header against the
/// access secret and injects the principal into the request extensions.
pub struct AuthUser {
    pub principal: Principal,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(&parts.headers, state)?;
        parts.extensions.insert(principal);
        Ok(AuthUser { principal })
    }
}

/// Optional variant of [`AuthUser`]: never rejects, yields `None` when the
/// request carries no usable credentials. For endpoints that behave
/// differently for authenticated and anonymous callers.
pub struct MaybeAuthUser(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(&parts.headers, state).ok();
        if let Some(principal) = principal {
            parts.extensions.insert(principal);
        }
        Ok(MaybeAuthUser(principal))
    }
}

/// Pull the token out of the Authorization header. The scheme prefix is
/// matched case-insensitively; a header carrying just the bare token is
/// accepted too.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let token = match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => &value[7..],
        _ => value,
    };

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub(crate) fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Principal, AppError> {
    let token = bearer_token(headers).ok_or_else(|| {
        AppError::Unauthorized(
            "Authentication required - send an Authorization header with a Bearer token"
                .to_string(),
        )
    })?;

    let claims = state
        .codec
        .verify(token, &state.config.jwt.access_secret)
        .map_err(|e| {
            tracing::warn!("access token rejected: {}", e);
            let message = match e {
                TokenError::Expired => "Token expired",
                TokenError::InvalidSignature => "Invalid token signature",
                TokenError::MissingClaims => "Invalid token format",
                _ => "Invalid or expired token",
            };
            AppError::Unauthorized(message.to_string())
        })?;

    Ok(claims.principal())
}
