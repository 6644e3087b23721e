use crate::application::auth::token_utils::{AuthResponse, issue_and_store_tokens};
use crate::domain::auth::{RefreshTokenRepository, TokenCodec};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{NewUser, Role, UserRepository, normalize_email};
use crate::infrastructure::config::JwtConfig;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub phone: Option<String>,
}

pub struct RegisterUseCase {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    codec: Arc<dyn TokenCodec>,
    password_service: Arc<dyn PasswordHashingService>,
    jwt: JwtConfig,
}

impl RegisterUseCase {
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
    pub async fn execute(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&req.email);

        let existing = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(AppError::InternalServerError)?;

        if existing.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self
            .password_service
            .hash_password(&req.password)
            .map_err(AppError::InternalServerError)?;

        // The pre-check above races with the unique index on users.email; a
        // concurrent registration that slips past it still collides on insert
        // and must surface as the same conflict
        let user = self
            .user_repo
            .create(NewUser {
                name: req.name,
                email,
                password_hash,
                role: Role::User,
                phone: req.phone,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Email already registered".to_string())
                } else {
                    AppError::InternalServerError(e)
                }
            })?;

        issue_and_store_tokens(user, &self.codec, &self.refresh_token_repo, &self.jwt).await
    }
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
