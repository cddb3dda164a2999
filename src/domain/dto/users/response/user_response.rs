use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::tokens::response::TokenResponse;
use crate::domain::entities::users::{Role, User};
use crate::utils::time_utils::to_chrono;

/// 사용자 공개 표현
///
/// 비밀번호 해시와 연결된 소셜 ID는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub picture: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            picture,
            role,
            created_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            picture,
            role,
            created_at: to_chrono(created_at),
        }
    }
}

/// 가입/로그인/소셜 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: TokenResponse,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(user: User, token: TokenResponse) -> Self {
        Self {
            token,
            user: UserResponse::from(user),
        }
    }
}
