//! 인증 및 보안 서비스 모듈
//!
//! JWT 액세스 토큰, 리프레시 토큰 회전, 비밀번호 재설정, 소셜 로그인을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 액세스 토큰 서명 (leeway 없음)
//! - 리프레시/재설정 토큰 단일 사용 (find-and-delete)
//! - bcrypt 비밀번호 해싱
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let auth = locator.get::<AuthService>()?;
//! let response = auth.login("jon@snow.com", "123456").await?;
//! ```

pub mod token_service;
pub mod auth_service;
pub mod password_reset_service;
pub mod oauth_provider_service;

pub use token_service::*;
pub use auth_service::*;
pub use password_reset_service::*;
pub use oauth_provider_service::*;
