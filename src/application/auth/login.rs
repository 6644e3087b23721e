use crate::application::auth::token_utils::{AuthResponse, issue_and_store_tokens};
use crate::domain::auth::{RefreshTokenRepository, TokenCodec};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{UserRepository, normalize_email};
use crate::infrastructure::config::JwtConfig;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    codec: Arc<dyn TokenCodec>,
    password_service: Arc<dyn PasswordHashingService>,
    jwt: JwtConfig,
}

impl LoginUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        codec: Arc<dyn TokenCodec>,
        password_service: Arc<dyn PasswordHashingService>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            codec,
            password_service,
            jwt,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        // Unknown email and bad password get the same message so the endpoint
        // cannot be used to enumerate accounts
        let invalid_credentials =
            || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self
            .user_repo
            .find_by_email(&normalize_email(&req.email))
            .await
            .map_err(AppError::InternalServerError)?
            .ok_or_else(invalid_credentials)?;

        let valid_password = self
            .password_service
            .verify_password(&req.password, &user.password_hash)
            .map_err(AppError::InternalServerError)?;

        if !valid_password {
            return Err(invalid_credentials());
        }

        // Opportunistic hygiene: drop this user's already-expired refresh rows
        let purged = self
            .refresh_token_repo
            .purge_expired(user.id)
            .await
            .map_err(AppError::InternalServerError)?;
        if purged > 0 {
            tracing::debug!(user_id = user.id, purged, "purged expired refresh tokens");
        }

        issue_and_store_tokens(user, &self.codec, &self.refresh_token_repo, &self.jwt).await
    }
}
