use crate::application::auth::token_utils::hash_token;
use crate::domain::auth::{RefreshTokenRepository, TokenCodec};
use crate::infrastructure::config::JwtConfig;
use std::sync::Arc;

pub struct LogoutUseCase {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    codec: Arc<dyn TokenCodec>,
    jwt: JwtConfig,
}

impl LogoutUseCase {
    pub fn new(
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        codec: Arc<dyn TokenCodec>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            refresh_token_repo,
            codec,
            jwt,
        }
    }

    /// Best-effort revocation. The user's intent is to end the session, so a
    /// missing, invalid, or already-revoked token is logged and swallowed;
    /// logout never fails.
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, raw_token: Option<&str>) {
        let Some(raw_token) = raw_token else {
            return;
        };

        let claims = match self.codec.verify(raw_token, &self.jwt.refresh_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("failed to verify refresh token on logout: {}", e);
                return;
            }
        };

        if let Err(e) = self
            .refresh_token_repo
            .remove(claims.sub, &hash_token(raw_token))
            .await
        {
            tracing::warn!(
                user_id = claims.sub,
                "failed to invalidate refresh token on logout: {}",
                e
            );
        }
    }
}
