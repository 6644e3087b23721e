use crate::domain::users::{NewUser, User, UserRepository};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, phone, created_at, updated_at
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .bind(new_user.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, phone, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, phone, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
