//! # Repository Layer
//!
//! 데이터 액세스 계층입니다. 서비스는 trait 객체(`Arc<dyn UserRepository>` 등)에만
//! 의존하므로 MongoDB 구현과 in-memory 구현을 바꿔 끼울 수 있습니다.
//!
//! - [`users`] - `users` 컬렉션
//! - [`tokens`] - `refresh_tokens`, `password_reset_tokens` 컬렉션
//! - [`memory`] - 테스트/로컬 실행용 in-memory 구현

pub mod users;
pub mod tokens;
pub mod memory;

use std::sync::Arc;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::core::registry::ServiceLocator;
use crate::db::Database;
use memory::{InMemoryPasswordResetTokenRepository, InMemoryRefreshTokenRepository, InMemoryUserRepository};
use tokens::{
    MongoPasswordResetTokenRepository, MongoRefreshTokenRepository, PasswordResetTokenRepository,
    RefreshTokenRepository,
};
use users::{MongoUserRepository, UserRepository};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반(중복 키) 에러인지 확인합니다
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// 서비스가 의존하는 리포지토리 묶음
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub reset_tokens: Arc<dyn PasswordResetTokenRepository>,
}

impl Repositories {
    /// MongoDB 리포지토리를 만들고 인덱스 초기화 대상으로 등록합니다
    pub fn mongo(db: Arc<Database>, locator: &ServiceLocator) -> Self {
        let users = Arc::new(MongoUserRepository::new(db.clone()));
        let refresh_tokens = Arc::new(MongoRefreshTokenRepository::new(db.clone()));
        let reset_tokens = Arc::new(MongoPasswordResetTokenRepository::new(db));

        locator.register_repository(users.clone());
        locator.register_repository(refresh_tokens.clone());
        locator.register_repository(reset_tokens.clone());

        Self {
            users,
            refresh_tokens,
            reset_tokens,
        }
    }

    /// in-memory 리포지토리를 등록합니다
    pub fn in_memory(
        users: Arc<InMemoryUserRepository>,
        refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
        reset_tokens: Arc<InMemoryPasswordResetTokenRepository>,
        locator: &ServiceLocator,
    ) -> Self {
        locator.register_repository(users.clone());
        locator.register_repository(refresh_tokens.clone());
        locator.register_repository(reset_tokens.clone());

        Self {
            users,
            refresh_tokens,
            reset_tokens,
        }
    }
}
