use crate::domain::auth::TokenCodec;
use crate::infrastructure::auth::JwtTokenCodec;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub codec: Arc<dyn TokenCodec>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        // Resolved once here so error responses never re-read the environment
        crate::shared::error::expose_error_detail(!config.environment.is_production());

        Self {
            pool,
            config: Arc::new(config),
            codec: Arc::new(JwtTokenCodec::new()),
        }
    }
}
