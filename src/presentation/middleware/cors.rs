use axum::http::HeaderValue;
use std::env;
use tower_http::cors::{Any, CorsLayer};

/// CORS policy from the CLIENT_URL env var (comma-separated origins).
/// Unset or `*` means permissive; unparseable entries are logged and skipped.
pub fn cors_layer() -> CorsLayer {
    let allowed_origins = env::var("CLIENT_URL").unwrap_or_default();

    if allowed_origins.is_empty() || allowed_origins == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| {
            let s = s.trim();
            match s.parse() {
                Ok(origin) => Some(origin),
                Err(e) => {
                    tracing::warn!("ignoring invalid CORS origin {s:?}: {e}");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
