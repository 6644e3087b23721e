use crate::domain::auth::{Claims, Principal, TokenCodec, TokenError};
use crate::domain::users::Role;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Deserialize;
use time::OffsetDateTime;

/// HMAC-SHA256 token codec backed by `jsonwebtoken`.
///
/// Stateless: the caller supplies the secret on every call, because the same
/// codec signs both access and refresh tokens with different keys.
pub struct JwtTokenCodec;

impl JwtTokenCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JwtTokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded shape before the presence of sub/role is enforced
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<i64>,
    role: Option<Role>,
    iat: Option<i64>,
    exp: i64,
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        principal: Principal,
        lifetime_secs: i64,
        secret: &str,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(principal, lifetime_secs);
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str, secret: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<RawClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })?;

        let raw = data.claims;

        // The library already validated exp; re-check it explicitly so a
        // library default (e.g. leeway) can never let a stale token through
        if raw.exp < OffsetDateTime::now_utc().unix_timestamp() {
            return Err(TokenError::Expired);
        }

        let (Some(sub), Some(role)) = (raw.sub, raw.role) else {
            return Err(TokenError::MissingClaims);
        };

        Ok(Claims {
            sub,
            role,
            iat: raw.iat.unwrap_or(0),
            exp: raw.exp,
        })
    }
}
