use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,

    #[serde(rename = "refreshToken")]
    #[validate(
        required(message = "\"refreshToken\" is required"),
        length(min = 1, message = "\"refreshToken\" is not allowed to be empty")
    )]
    pub refresh_token: Option<String>,
}

/// 비밀번호 재설정 메일 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct SendPasswordResetRequest {
    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,
}

/// 비밀번호 재설정 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
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

    #[serde(rename = "resetToken")]
    #[validate(
        required(message = "\"resetToken\" is required"),
        length(min = 1, message = "\"resetToken\" is not allowed to be empty")
    )]
    pub reset_token: Option<String>,
}
