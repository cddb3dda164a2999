//! # 토큰 리포지토리
//!
//! 리프레시 토큰과 비밀번호 재설정 토큰의 저장/소비를 담당합니다.
//!
//! 토큰은 `consume`으로만 읽습니다. 조회와 삭제가 한 번의 원자적
//! find-and-delete로 이뤄지므로 같은 토큰이 두 번 사용될 수 없습니다.
//! 만료 여부 판단은 서비스 계층에서 합니다 (만료된 토큰도 삭제는 됩니다).

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::tokens::{PasswordResetToken, RefreshToken},
};

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;

    /// `{user_email, token}`이 일치하는 토큰을 꺼내면서 삭제합니다
    async fn consume(&self, user_email: &str, token: &str) -> AppResult<Option<RefreshToken>>;

    /// 사용자의 모든 리프레시 토큰을 삭제하고 삭제된 개수를 반환합니다
    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    async fn create(&self, token: PasswordResetToken) -> AppResult<PasswordResetToken>;

    /// `{user_email, reset_token}`이 일치하는 토큰을 꺼내면서 삭제합니다
    async fn consume(&self, user_email: &str, reset_token: &str) -> AppResult<Option<PasswordResetToken>>;
}

/// MongoDB `refresh_tokens` 컬렉션 구현
pub struct MongoRefreshTokenRepository {
    db: Arc<Database>,
}

impl MongoRefreshTokenRepository {
    pub const COLLECTION: &'static str = "refresh_tokens";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<RefreshToken> {
        self.db.get_database().collection::<RefreshToken>(Self::COLLECTION)
    }
}

#[async_trait]
impl Repository for MongoRefreshTokenRepository {
    fn name(&self) -> &str {
        "refresh_token"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token": 1, "user_email": 1 })
            .options(IndexOptions::builder()
                .name("token_user_email".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id_asc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([token_index, user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn create(&self, mut token: RefreshToken) -> AppResult<RefreshToken> {
        let result = self.collection()
            .insert_one(&token)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        token.id = result.inserted_id.as_object_id();
        Ok(token)
    }

    async fn consume(&self, user_email: &str, token: &str) -> AppResult<Option<RefreshToken>> {
        self.collection()
            .find_one_and_delete(doc! { "user_email": user_email, "token": token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection()
            .delete_many(doc! { "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}

/// MongoDB `password_reset_tokens` 컬렉션 구현
pub struct MongoPasswordResetTokenRepository {
    db: Arc<Database>,
}

impl MongoPasswordResetTokenRepository {
    pub const COLLECTION: &'static str = "password_reset_tokens";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<PasswordResetToken> {
        self.db.get_database().collection::<PasswordResetToken>(Self::COLLECTION)
    }
}

#[async_trait]
impl Repository for MongoPasswordResetTokenRepository {
    fn name(&self) -> &str {
        "password_reset_token"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "reset_token": 1, "user_email": 1 })
            .options(IndexOptions::builder()
                .name("reset_token_user_email".to_string())
                .build())
            .build();

        self.collection()
            .create_index(token_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PasswordResetTokenRepository for MongoPasswordResetTokenRepository {
    async fn create(&self, mut token: PasswordResetToken) -> AppResult<PasswordResetToken> {
        let result = self.collection()
            .insert_one(&token)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        token.id = result.inserted_id.as_object_id();
        Ok(token)
    }

    async fn consume(&self, user_email: &str, reset_token: &str) -> AppResult<Option<PasswordResetToken>> {
        self.collection()
            .find_one_and_delete(doc! { "user_email": user_email, "reset_token": reset_token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
