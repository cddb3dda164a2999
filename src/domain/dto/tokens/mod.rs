//! 토큰 갱신, 비밀번호 재설정 요청과 토큰 응답 DTO

pub mod request;
pub mod response;

pub use request::{RefreshTokenRequest, ResetPasswordRequest, SendPasswordResetRequest};
pub use response::TokenResponse;
