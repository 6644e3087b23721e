use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::users::Role;

/// The authenticated identity carried by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: i64,
    pub role: Role,
}

/// JWT claims structure.
///
/// There is deliberately no token-type claim: an access token and a refresh
/// token carry identical claims and are told apart only by which secret
/// verifies them. Callers must try the secret that matches their context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: i64,
    /// Role embedded at issuance
    pub role: Role,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn new(principal: Principal, lifetime_secs: i64) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub: principal.user_id,
            role: principal.role,
            iat: now,
            exp: now + lifetime_secs,
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            role: self.role,
        }
    }
}

/// Verification and issuance failures, kept distinct so the request gate can
/// map them to distinguishable 401 messages
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token missing required claims")]
    MissingClaims,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Signs and verifies expiring claim sets. The secret is always explicit:
/// access and refresh tokens share this codec and differ only in the secret
/// and lifetime their caller supplies.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, principal: Principal, lifetime_secs: i64, secret: &str)
    -> Result<String, TokenError>;

    fn verify(&self, token: &str, secret: &str) -> Result<Claims, TokenError>;
}

/// Outstanding refresh token row. Only the sha256 hash of the token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
}

/// Repository for outstanding refresh tokens, keyed by (user_id, token_hash).
/// The store is the source of truth for revocation: a signature-valid token
/// with no live row here must be rejected.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn insert(&self, token: NewRefreshToken) -> Result<RefreshToken>;

    /// Returns the matching record only while it is unexpired; an expired row
    /// is treated the same as an absent one
    async fn find(&self, user_id: i64, token_hash: &str) -> Result<Option<RefreshToken>>;

    /// Deletes the matching record. Idempotent; returns the number of rows
    /// removed so rotation can detect a concurrent delete
    async fn remove(&self, user_id: i64, token_hash: &str) -> Result<u64>;

    /// Deletes all expired records for a user. Hygiene only, not required for
    /// correctness
    async fn purge_expired(&self, user_id: i64) -> Result<u64>;
}
