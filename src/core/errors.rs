//! # Application Error System
//!
//! 애플리케이션 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를
//! HTTP 상태 코드가 붙은 평탄한 에러 분류로 표현합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "code": 409,
//!   "message": "\"email\" already exists",
//!   "errors": [
//!     { "field": "email", "location": "body", "messages": ["\"email\" already exists"] }
//!   ]
//! }
//! ```
//!
//! - `errors`는 필드 단위 검증 실패가 있을 때만 포함됩니다.
//! - `stack`(에러의 Debug 표현)은 프로덕션이 아닌 환경에서만 포함됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AuthError};
//!
//! async fn login(email: &str) -> Result<User, AppError> {
//!     let user = repo.find_by_email(email).await?
//!         .ok_or(AuthError::IncorrectCredentials)?;
//!     Ok(user)
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::config::Environment;
use crate::utils::string_utils::to_camel_case;

/// 검증 실패가 발생한 요청 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Body,
    Query,
    Params,
}

/// 필드 단위 검증 에러
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: FieldLocation,
    pub messages: Vec<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, location: FieldLocation, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            location,
            messages: vec![message.into()],
        }
    }

    /// `validator` 결과를 필드 에러 목록으로 변환합니다
    ///
    /// 필드명은 요청 본문 키(camelCase)로 바꾸고, 결과는 필드명 순으로 정렬합니다.
    /// `#[serde(rename)]`으로 원래 이름을 유지하는 필드(`access_token`)는 그대로 둡니다.
    pub fn from_validation(errors: &validator::ValidationErrors, location: FieldLocation) -> Vec<Self> {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let name = if field == "access_token" {
                    field.to_string()
                } else {
                    to_camel_case(&field)
                };

                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("\"{}\" is invalid", name))
                    })
                    .collect();

                FieldError { field: name, location, messages }
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields
    }
}

/// 인증/토큰 도메인 실패
///
/// 메시지는 클라이언트에 그대로 노출되는 공개 메시지입니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// 이미 가입된 이메일 (409)
    #[error("\"email\" already exists")]
    EmailAlreadyExists,

    /// 이메일/비밀번호 불일치 (401)
    #[error("Incorrect email or password")]
    IncorrectCredentials,

    /// 이메일과 리프레시 토큰 조합이 저장된 토큰과 일치하지 않음 (401)
    #[error("Incorrect email or refreshToken")]
    IncorrectRefreshCredentials,

    /// 일치하는 리프레시 토큰이 만료됨 (401)
    #[error("Invalid refresh token.")]
    InvalidRefreshToken,

    /// 비밀번호 재설정 요청 이메일에 해당하는 계정 없음 (401)
    #[error("No account found with that email")]
    NoAccountFound,

    /// 이메일과 재설정 토큰 조합이 일치하지 않음 (401)
    #[error("Cannot find matching reset token")]
    TokenMismatch,

    /// 재설정 토큰 만료 (401)
    #[error("Reset token is expired, please try again")]
    TokenExpired,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 필드 단위 입력값 검증 에러 (400 Bad Request)
    #[error("Validation Error")]
    ValidationError(Vec<FieldError>),

    /// 본문/쿼리 파싱 실패 등 잘못된 요청 (400 Bad Request)
    #[error("{0}")]
    BadRequest(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("{0}")]
    ConflictError(String),

    /// 인증/토큰 도메인 에러 (401, 이메일 중복은 409)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("{0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("{0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User does not exist".to_string())
    }

    pub fn unauthorized() -> Self {
        AppError::AuthenticationError("Unauthorized".to_string())
    }

    pub fn forbidden() -> Self {
        AppError::AuthorizationError("Forbidden".to_string())
    }

    /// 응답 본문의 `errors` 배열에 들어갈 필드 에러 목록
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            AppError::ValidationError(errors) => Some(errors.clone()),
            AppError::Auth(AuthError::EmailAlreadyExists) => Some(vec![FieldError::new(
                "email",
                FieldLocation::Body,
                AuthError::EmailAlreadyExists.to_string(),
            )]),
            _ => None,
        }
    }

    /// 응답 본문을 만듭니다
    pub fn to_body(&self, include_stack: bool) -> serde_json::Value {
        let mut body = serde_json::json!({
            "code": self.status_code().as_u16(),
            "message": self.to_string(),
        });

        if let Some(errors) = self.field_errors() {
            body["errors"] = serde_json::json!(errors);
        }

        if include_stack {
            body["stack"] = serde_json::json!(format!("{:?}", self));
        }

        body
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::Auth(e) => e.status(),
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 응답 전에 에러 로그로 남깁니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status, self);
        }

        let include_stack = Environment::current() != Environment::Production;
        HttpResponse::build(status).json(self.to_body(include_stack))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// `validator::Validate` 결과를 위치 정보가 붙은 `AppError`로 변환합니다
pub trait ValidateExt {
    fn validate_at(&self, location: FieldLocation) -> AppResult<()>;
}

impl<T: validator::Validate> ValidateExt for T {
    fn validate_at(&self, location: FieldLocation) -> AppResult<()> {
        self.validate()
            .map_err(|errors| AppError::ValidationError(FieldError::from_validation(&errors, location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError(vec![FieldError::new(
            "email",
            FieldLocation::Body,
            "\"email\" is required",
        )]);
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let response = AppError::user_not_found().error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_auth_error_status_mapping() {
        assert_eq!(AppError::from(AuthError::EmailAlreadyExists).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::from(AuthError::IncorrectCredentials).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::InvalidRefreshToken).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::TokenExpired).status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let response = AppError::forbidden().error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_public_messages_are_unprefixed() {
        assert_eq!(AppError::from(AuthError::IncorrectCredentials).to_string(), "Incorrect email or password");
        assert_eq!(AppError::from(AuthError::InvalidRefreshToken).to_string(), "Invalid refresh token.");
        assert_eq!(AppError::forbidden().to_string(), "Forbidden");
    }

    #[test]
    fn test_email_conflict_body_has_field_detail() {
        let body = AppError::from(AuthError::EmailAlreadyExists).to_body(false);

        assert_eq!(body["code"], 409);
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][0]["location"], "body");
        assert_eq!(body["errors"][0]["messages"][0], "\"email\" already exists");
        assert!(body.get("stack").is_none());
    }

    #[test]
    fn test_stack_only_when_requested() {
        let error = AppError::AuthenticationError("jwt expired".to_string());

        assert!(error.to_body(false).get("stack").is_none());
        assert!(error.to_body(true).get("stack").is_some());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(required(message = "\"email\" is required"))]
        email: Option<String>,

        #[validate(required(message = "\"refreshToken\" is required"))]
        refresh_token: Option<String>,
    }

    #[test]
    fn test_validate_at_maps_fields_to_request_keys() {
        let sample = Sample { email: None, refresh_token: None };

        match sample.validate_at(FieldLocation::Body) {
            Err(AppError::ValidationError(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].messages, vec!["\"email\" is required".to_string()]);
                assert_eq!(errors[1].field, "refreshToken");
                assert_eq!(errors[1].location, FieldLocation::Body);
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
