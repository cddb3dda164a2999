//! 인증 요청관련 DTO
//!
//! 가입, 로그인, 소셜 로그인 요청 본문을 매핑합니다.
//! 필수 필드도 `Option`으로 받아 누락을 역직렬화 에러가 아닌 필드 검증 에러로 돌려줍니다.
use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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
}

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "\"password\" is required"),
        length(max = 128, message = "\"password\" length must be less than or equal to 128 characters")
    )]
    pub password: Option<String>,
}

/// 소셜 로그인 요청 (프로바이더에서 받은 액세스 토큰)
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthRequest {
    #[validate(
        required(message = "\"access_token\" is required"),
        length(min = 1, message = "\"access_token\" is not allowed to be empty")
    )]
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email":"jon@snow.com","password":"123456","name":"Jon"}"#).unwrap();

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_reports_each_field() {
        let request: RegisterRequest = serde_json::from_str(r#"{"email":"not-an-email","password":"123"}"#).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_login_request_missing_fields() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_oauth_request_rejects_empty_token() {
        let request: OAuthRequest = serde_json::from_str(r#"{"access_token":""}"#).unwrap();

        assert!(request.validate().is_err());
    }
}
