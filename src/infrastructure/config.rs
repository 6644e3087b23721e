use crate::shared::error::AppError;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Token signing configuration, resolved once at startup.
///
/// The refresh secret falls back to the access secret when not independently
/// configured, so by default both token kinds verify against the same key.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expiry_secs: i64,
    pub refresh_expiry_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let access_secret = non_empty_var("JWT_SECRET").ok_or_else(|| {
            AppError::ConfigurationError("JWT_SECRET must be set".to_string())
        })?;

        let refresh_secret =
            non_empty_var("JWT_REFRESH_SECRET").unwrap_or_else(|| access_secret.clone());

        let access_expiry_secs = parse_expiry(
            &env::var("JWT_EXPIRY").unwrap_or_else(|_| "24h".to_string()),
        )?;
        let refresh_expiry_secs = parse_expiry(
            &env::var("JWT_REFRESH_EXPIRY").unwrap_or_else(|_| "30d".to_string()),
        )?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_expiry_secs,
            refresh_expiry_secs,
        })
    }
}

/// Process-wide configuration, constructed once in `main` and injected via
/// application state rather than read from globals
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            environment: Environment::from_env(),
            jwt: JwtConfig::from_env()?,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a lifetime expression into seconds. Accepts a bare integer (seconds)
/// or `<number><unit>` with unit one of s/m/h/d, e.g. `24h`, `30d`.
pub fn parse_expiry(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();

    let unsupported =
        || AppError::ConfigurationError(format!("Unsupported expiry format: {raw}"));

    if raw.is_empty() || !raw.is_ascii() {
        return Err(unsupported());
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<i64>().map_err(|_| unsupported());
    }

    let (value, unit) = raw.split_at(raw.len() - 1);
    let multiplier = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(unsupported()),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unsupported());
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|v| v.checked_mul(multiplier))
        .ok_or_else(unsupported)
}
