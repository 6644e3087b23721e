use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::refresh::RefreshUseCase;
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::application::auth::token_utils::AuthResponse;
use crate::domain::auth::Principal;
use crate::domain::users::{PublicUser, UserRepository};
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::cookie::{
    REFRESH_COOKIE_NAME, clear_refresh_cookie, get_cookie, refresh_cookie,
};
use crate::presentation::extractors::{AuthUser, MaybeAuthUser};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::MessageResponse;
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body shape for refresh and logout. The cookie takes precedence; the body
/// field exists for non-browser clients and accepts both naming conventions.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Principal>,
}

/// Attach the refresh cookie and serialize the auth payload
fn auth_success(
    status: StatusCode,
    response: AuthResponse,
    state: &AppState,
) -> Result<Response, AppError> {
    let cookie = refresh_cookie(
        &response.refresh_token,
        state.config.jwt.refresh_expiry_secs,
        state.config.environment.is_production(),
    )?;

    Ok((
        status,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(response),
    )
        .into_response())
}

fn refresh_token_from(headers: &HeaderMap, body: Option<Json<RefreshRequest>>) -> Option<String> {
    get_cookie(headers, REFRESH_COOKIE_NAME)
        .or_else(|| body.and_then(|Json(req)| req.refresh_token))
}

/// Register handler
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Response, AppError> {
    let use_case = RegisterUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        state.codec.clone(),
        Arc::new(PasswordService::new()),
        state.config.jwt.clone(),
    );

    let response = use_case.execute(req).await?;
    auth_success(StatusCode::CREATED, response, &state)
}

/// Login handler
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let use_case = LoginUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        state.codec.clone(),
        Arc::new(PasswordService::new()),
        state.config.jwt.clone(),
    );

    let response = use_case.execute(req).await?;
    auth_success(StatusCode::OK, response, &state)
}

/// Refresh handler. The token arrives via the refreshToken cookie or the
/// request body, cookie winning when both are present.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = AuthResponse),
        (status = 401, description = "Invalid or revoked refresh token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<Response, AppError> {
    let token = refresh_token_from(&headers, body)
        .ok_or_else(|| AppError::Unauthorized("Refresh token missing".to_string()))?;

    let use_case = RefreshUseCase::new(
        Arc::new(PostgresUserRepository::new(state.pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        state.codec.clone(),
        state.config.jwt.clone(),
    );

    let response = use_case.execute(&token).await?;
    auth_success(StatusCode::OK, response, &state)
}

/// Logout handler. Requires an authenticated caller; revocation of the
/// refresh token itself is best-effort and never fails the request.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let token = refresh_token_from(&headers, body);

    LogoutUseCase::new(
        Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone())),
        state.codec.clone(),
        state.config.jwt.clone(),
    )
    .execute(token.as_deref())
    .await;

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            clear_refresh_cookie(state.config.environment.is_production()),
        )]),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// Current user profile for the authenticated principal
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = PublicUser),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let repo = PostgresUserRepository::new(state.pool.clone());

    let user = repo
        .find_by_id(auth_user.principal.user_id)
        .await
        .map_err(AppError::InternalServerError)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Session probe: reports whether the caller presented valid credentials
/// without ever rejecting the request
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session state", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn session(MaybeAuthUser(principal): MaybeAuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: principal.is_some(),
        user: principal,
    })
}
