//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//!
//! ## 특징
//!
//! - **trait 기반**: 서비스는 `Arc<dyn UserRepository>`에만 의존
//! - **데이터 무결성**: 이메일 유니크 인덱스, 중복은 `AuthError::EmailAlreadyExists`
//! - **목록 조회**: 정확히 일치하는 필터, `created_at` 내림차순, skip/limit 페이지네이션

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult, AuthError},
    core::registry::Repository,
    db::Database,
    domain::entities::users::{Role, User},
    repositories::is_duplicate_key,
};

/// 목록 조회 필터 (모두 정확히 일치)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.name.as_ref().is_none_or(|name| user.name.as_ref() == Some(name))
            && self.email.as_ref().is_none_or(|email| &user.email == email)
            && self.role.is_none_or(|role| user.role == role)
    }

    fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(name) = &self.name {
            filter.insert("name", name.as_str());
        }
        if let Some(email) = &self.email {
            filter.insert("email", email.as_str());
        }
        if let Some(role) = self.role {
            filter.insert("role", role.as_str());
        }
        filter
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 정규화된(소문자) 이메일로 조회합니다
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// `services.<provider> == provider_id` 또는 `email`이 일치하는 사용자를 찾습니다
    async fn find_by_oauth(&self, provider: AuthProvider, provider_id: &str, email: &str) -> AppResult<Option<User>>;

    async fn list(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<Vec<User>>;

    /// 새 사용자를 저장하고 `_id`가 채워진 사용자를 반환합니다
    ///
    /// # Errors
    ///
    /// 이메일 중복 시 `AuthError::EmailAlreadyExists`
    async fn create(&self, user: User) -> AppResult<User>;

    /// `_id`가 같은 문서를 통째로 교체합니다. 대상이 없으면 `None`
    async fn replace(&self, user: User) -> AppResult<Option<User>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

/// MongoDB `users` 컬렉션 구현
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    fn map_write_error(e: mongodb::error::Error) -> AppError {
        if is_duplicate_key(&e) {
            AuthError::EmailAlreadyExists.into()
        } else {
            AppError::DatabaseError(e.to_string())
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .name("name_asc".to_string())
                .build())
            .build();

        // 목록 정렬용 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, name_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Repository for MongoUserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_oauth(&self, provider: AuthProvider, provider_id: &str, email: &str) -> AppResult<Option<User>> {
        let mut by_service = Document::new();
        by_service.insert(format!("services.{}", provider.as_str()), provider_id);

        self.collection()
            .find_one(doc! { "$or": [ by_service, { "email": email } ] })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        let cursor = self.collection()
            .find(filter.to_document())
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(Self::map_write_error)?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn replace(&self, user: User) -> AppResult<Option<User>> {
        let id = user.id.ok_or_else(|| AppError::InternalError("Cannot replace a user without _id".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, &user)
            .await
            .map_err(Self::map_write_error)?;

        Ok((result.matched_count > 0).then_some(user))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
