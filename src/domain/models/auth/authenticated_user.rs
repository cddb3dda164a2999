//! 인증된 사용자 정보
//!
//! 인증 미들웨어가 액세스 토큰을 검증하고 사용자를 조회한 뒤
//! 요청 extensions에 넣어 두는 값입니다. 핸들러에서는 extractor로 꺼냅니다.

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::users::{Role, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ObjectId (16진수 문자열)
    pub user_id: String,

    pub email: String,

    pub role: Role,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            user_id: user.id_string()?,
            email: user.email.clone(),
            role: user.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 본인이거나 관리자인지 확인합니다
    pub fn can_access(&self, user_id: &str) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::unauthorized())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "5f1b2c3d4e5f6a7b8c9d0e1f".to_string(),
            email: "jon@snow.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_can_access_self() {
        let current = user(Role::User);

        assert!(current.can_access("5f1b2c3d4e5f6a7b8c9d0e1f"));
        assert!(!current.can_access("000000000000000000000000"));
    }

    #[test]
    fn test_admin_can_access_anyone() {
        let admin = user(Role::Admin);

        assert!(admin.is_admin());
        assert!(admin.can_access("000000000000000000000000"));
    }

    #[test]
    fn test_from_unsaved_user_is_none() {
        let unsaved = User::new_local("jon@snow.com", "hash".to_string(), None, Role::User);

        assert!(AuthenticatedUser::from_user(&unsaved).is_none());
    }
}
