use crate::application::auth::login::LoginRequest;
use crate::application::auth::register::RegisterRequest;
use crate::application::auth::token_utils::AuthResponse;
use crate::domain::auth::Principal;
use crate::domain::users::{PublicUser, Role};
use crate::presentation::handlers::auth::{RefreshRequest, SessionResponse};
use crate::shared::error::ErrorResponse;
use crate::shared::response::MessageResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::auth::session,
        crate::presentation::handlers::health::health_check,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        RefreshRequest,
        AuthResponse,
        SessionResponse,
        MessageResponse,
        ErrorResponse,
        PublicUser,
        Principal,
        Role,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, and token lifecycle"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
