//! 사용자 관리 요청 DTO
//!
//! 관리자/본인이 사용하는 사용자 생성, 교체, 부분 수정, 목록 조회 요청을 정의합니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::users::Role;
use crate::utils::string_utils::deserialize_optional_string;

/// `role` 값이 허용된 역할인지 검증
fn validate_role(role: &str) -> Result<(), ValidationError> {
    if Role::from_str(role).is_none() {
        let allowed: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        return Err(ValidationError::new("invalid_role")
            .with_message(format!("\"role\" must be one of [{}]", allowed.join(", ")).into()));
    }
    Ok(())
}

/// `POST /v1/users` 본문
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "\"password\" is required"),
        length(min = 6, max = 128, message = "\"password\" length must be between 6 and 128 characters")
    )]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 128, message = "\"name\" length must be less than or equal to 128 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

/// `PUT /v1/users/{userId}` 본문 (전체 교체, 생성과 같은 규칙)
pub type ReplaceUserRequest = CreateUserRequest;

/// `PATCH /v1/users/{userId}` 본문 (모든 필드 선택)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "\"password\" length must be between 6 and 128 characters"))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 128, message = "\"name\" length must be less than or equal to 128 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

/// `GET /v1/users` 쿼리
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "\"page\" must be greater than or equal to 1"))]
    pub page: Option<u64>,

    #[serde(rename = "perPage")]
    #[validate(range(min = 1, max = 100, message = "\"perPage\" must be between 1 and 100"))]
    pub per_page: Option<u64>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

impl ListUsersQuery {
    pub const DEFAULT_PER_PAGE: u64 = 30;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(Self::DEFAULT_PER_PAGE)
    }

    /// 건너뛸 문서 수: `perPage * (page - 1)`
    ///
    /// 아주 큰 `page`는 `i64::MAX`에서 멈춥니다. MongoDB skip은 i64입니다.
    pub fn skip(&self) -> u64 {
        self.per_page()
            .saturating_mul(self.page().saturating_sub(1))
            .min(i64::MAX as u64)
    }
}
