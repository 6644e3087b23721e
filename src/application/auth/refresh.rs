use crate::application::auth::token_utils::{AuthResponse, hash_token, issue_and_store_tokens};
use crate::domain::auth::{RefreshTokenRepository, TokenCodec};
use crate::domain::users::UserRepository;
use crate::infrastructure::config::JwtConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct RefreshUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    codec: Arc<dyn TokenCodec>,
    jwt: JwtConfig,
}

impl RefreshUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        codec: Arc<dyn TokenCodec>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            codec,
            jwt,
        }
    }

    /// Exchange an outstanding refresh token for a new access/refresh pair,
    /// rotating the old token out of the store.
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, raw_token: &str) -> Result<AuthResponse, AppError> {
        let claims = self
            .codec
            .verify(raw_token, &self.jwt.refresh_secret)
            .map_err(|e| {
                tracing::warn!("refresh token verification failed: {}", e);
                AppError::Unauthorized("Invalid refresh token".to_string())
            })?;

        let token_hash = hash_token(raw_token);

        // The store is the source of truth for revocation: a token that
        // verifies cryptographically is still rejected once rotated out or
        // revoked by logout
        let record = self
            .refresh_token_repo
            .find(claims.sub, &token_hash)
            .await
            .map_err(AppError::InternalServerError)?;

        if record.is_none() {
            tracing::warn!(user_id = claims.sub, "refresh token not found in store");
            return Err(AppError::Unauthorized(
                "Refresh token not recognized or expired".to_string(),
            ));
        }

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await
            .map_err(AppError::InternalServerError)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Rotation via compare-and-delete: if a concurrent refresh already
        // removed this row, the slower caller loses
        let removed = self
            .refresh_token_repo
            .remove(claims.sub, &token_hash)
            .await
            .map_err(AppError::InternalServerError)?;

        if removed == 0 {
            return Err(AppError::Unauthorized(
                "Refresh token not recognized or expired".to_string(),
            ));
        }

        issue_and_store_tokens(user, &self.codec, &self.refresh_token_repo, &self.jwt).await
    }
}
