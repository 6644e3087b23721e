use crate::domain::users::Role;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use axum::{
    Extension,
    extract::Request,
    middleware::Next,
    response::Response,
};

/// Role allow-list attached to a route via `Extension`, checked by
/// [`require_role`] after authentication
#[derive(Clone)]
pub struct AllowedRoles(pub &'static [Role]);

/// Typed role gate. Composes after [`AuthUser`]: authentication failures are
/// 401s from the extractor, an authenticated caller outside the allow-list
/// gets a 403.
pub async fn require_role(
    Extension(allowed): Extension<AllowedRoles>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !allowed.0.contains(&auth_user.principal.role) {
        tracing::warn!(
            user_id = auth_user.principal.user_id,
            role = %auth_user.principal.role,
            "role not permitted for this route"
        );
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }

    Ok(next.run(request).await)
}
