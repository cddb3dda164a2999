//! # In-memory 리포지토리
//!
//! MongoDB 없이 동작하는 리포지토리 구현입니다.
//! 통합 테스트와 `STORAGE_BACKEND=memory` 로컬 실행에서 사용하며,
//! 이메일 유니크 제약과 토큰 단일 소비를 MongoDB 구현과 동일하게 지킵니다.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult, AuthError},
    core::registry::Repository,
    domain::entities::tokens::{PasswordResetToken, RefreshToken},
    domain::entities::users::User,
    repositories::tokens::{PasswordResetTokenRepository, RefreshTokenRepository},
    repositories::users::{UserFilter, UserRepository},
};

fn poisoned() -> AppError {
    AppError::InternalError("In-memory store lock poisoned".to_string())
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Repository for InMemoryUserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        "users"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_oauth(&self, provider: AuthProvider, provider_id: &str, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users
            .iter()
            .find(|u| u.services.get(provider) == Some(provider_id) || u.email == email)
            .cloned())
    }

    async fn list(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;

        let mut matched: Vec<User> = users.iter().filter(|u| filter.matches(u)).cloned().collect();
        // 생성 순서의 역순을 유지하도록 뒤집은 뒤 안정 정렬
        matched.reverse();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| poisoned())?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn replace(&self, user: User) -> AppResult<Option<User>> {
        let mut users = self.users.write().map_err(|_| poisoned())?;

        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        match users.iter_mut().find(|u| u.id.is_some() && u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        Ok(users.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<Vec<RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, user_email: &str) -> usize {
        self.tokens
            .read()
            .map(|tokens| tokens.iter().filter(|t| t.user_email == user_email).count())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Repository for InMemoryRefreshTokenRepository {
    fn name(&self) -> &str {
        "refresh_token"
    }

    fn collection_name(&self) -> &str {
        "refresh_tokens"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, mut token: RefreshToken) -> AppResult<RefreshToken> {
        token.id = Some(ObjectId::new());
        self.tokens.write().map_err(|_| poisoned())?.push(token.clone());
        Ok(token)
    }

    async fn consume(&self, user_email: &str, token: &str) -> AppResult<Option<RefreshToken>> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;

        let position = tokens.iter().position(|t| t.user_email == user_email && t.token == token);
        Ok(position.map(|index| tokens.remove(index)))
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;
        let before = tokens.len();
        tokens.retain(|t| &t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryPasswordResetTokenRepository {
    tokens: RwLock<Vec<PasswordResetToken>>,
}

impl InMemoryPasswordResetTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryPasswordResetTokenRepository {
    fn name(&self) -> &str {
        "password_reset_token"
    }

    fn collection_name(&self) -> &str {
        "password_reset_tokens"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl PasswordResetTokenRepository for InMemoryPasswordResetTokenRepository {
    async fn create(&self, mut token: PasswordResetToken) -> AppResult<PasswordResetToken> {
        token.id = Some(ObjectId::new());
        self.tokens.write().map_err(|_| poisoned())?.push(token.clone());
        Ok(token)
    }

    async fn consume(&self, user_email: &str, reset_token: &str) -> AppResult<Option<PasswordResetToken>> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;

        let position = tokens
            .iter()
            .position(|t| t.user_email == user_email && t.reset_token == reset_token);
        Ok(position.map(|index| tokens.remove(index)))
    }
}
