use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::infrastructure::db::DbPool;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresRefreshTokenRepository {
    pool: DbPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn insert(&self, token: NewRefreshToken) -> Result<RefreshToken> {
        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, expires_at, created_at
            "#,
        )
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find(&self, user_id: i64, token_hash: &str) -> Result<Option<RefreshToken>> {
        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM refresh_tokens
            WHERE user_id = $1 AND token_hash = $2 AND expires_at > NOW()
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn remove(&self, user_id: i64, token_hash: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1 AND token_hash = $2
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn purge_expired(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1 AND expires_at < NOW()
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
