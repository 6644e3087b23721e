use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::domain::users::{NewUser, Role, User, UserRepository};
use crate::infrastructure::config::JwtConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use time::OffsetDateTime;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_expiry_secs: 3600,
        refresh_expiry_secs: 86_400,
    }
}

pub fn test_user(id: i64, email: &str, password_hash: &str) -> User {
    let now = OffsetDateTime::now_utc();
    User {
        id,
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role: Role::User,
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory user store standing in for Postgres
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: users.len() as i64 + 1,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            phone: new_user.phone,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory refresh token store with the same expiry semantics as the
/// Postgres repository
#[derive(Default)]
pub struct MockRefreshTokenRepository {
    records: Mutex<Vec<RefreshToken>>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, record: RefreshToken) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn insert(&self, token: NewRefreshToken) -> Result<RefreshToken> {
        let mut records = self.records.lock().unwrap();
        let record = RefreshToken {
            id: records.len() as i64 + 1,
            user_id: token.user_id,
            token_hash: token.token_hash,
            expires_at: token.expires_at,
            created_at: OffsetDateTime::now_utc(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find(&self, user_id: i64, token_hash: &str) -> Result<Option<RefreshToken>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.token_hash == token_hash && r.expires_at > now)
            .cloned())
    }

    async fn remove(&self, user_id: i64, token_hash: &str) -> Result<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.user_id == user_id && r.token_hash == token_hash));
        Ok((before - records.len()) as u64)
    }

    async fn purge_expired(&self, user_id: i64) -> Result<u64> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.user_id == user_id && r.expires_at < now));
        Ok((before - records.len()) as u64)
    }
}
