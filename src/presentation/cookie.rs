use crate::shared::error::AppError;
use axum::http::{HeaderMap, HeaderValue, header};

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Read a single cookie value from the Cookie request header
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Build the Set-Cookie value carrying the refresh token for browser clients.
/// HttpOnly and SameSite=Lax always; Secure only in production so local
/// development over plain HTTP keeps working.
pub fn refresh_cookie(
    token: &str,
    max_age_secs: i64,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{REFRESH_COOKIE_NAME}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("invalid cookie value: {e}")))
}

/// Build the Set-Cookie value that expires the refresh cookie immediately
pub fn clear_refresh_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(
            "refreshToken=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax; Secure",
        )
    } else {
        HeaderValue::from_static("refreshToken=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }
}
