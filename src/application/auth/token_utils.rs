use crate::domain::auth::{NewRefreshToken, Principal, RefreshTokenRepository, TokenCodec};
use crate::domain::users::{PublicUser, User};
use crate::infrastructure::config::JwtConfig;
use crate::shared::error::AppError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::OffsetDateTime;

/// Response body for every successful register/login/refresh
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// SHA-256 hex digest of a token string; refresh tokens are stored hashed
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Issue an access/refresh pair for the user and persist the refresh hash
pub async fn issue_and_store_tokens(
    user: User,
    codec: &Arc<dyn TokenCodec>,
    refresh_token_repo: &Arc<dyn RefreshTokenRepository>,
    jwt: &JwtConfig,
) -> Result<AuthResponse, AppError> {
    let principal = Principal {
        user_id: user.id,
        role: user.role,
    };

    let access_token = codec
        .issue(principal, jwt.access_expiry_secs, &jwt.access_secret)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!(e)))?;

    let refresh_token = codec
        .issue(principal, jwt.refresh_expiry_secs, &jwt.refresh_secret)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!(e)))?;

    let expires_at = OffsetDateTime::now_utc() + time::Duration::seconds(jwt.refresh_expiry_secs);

    refresh_token_repo
        .insert(NewRefreshToken {
            user_id: user.id,
            token_hash: hash_token(&refresh_token),
            expires_at,
        })
        .await
        .map_err(AppError::InternalServerError)?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
        expires_in: jwt.access_expiry_secs,
    })
}
