//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 주요 구성 요소
//!
//! - **User**: 로컬 가입과 소셜 계정 연결을 함께 담는 사용자 문서
//! - **Role**: `user` / `admin`
//! - **LinkedServices**: `services.facebook`, `services.google` 프로바이더 ID
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, Role};
//!
//! let user = User::new_local("user@example.com", password_hash, Some("Jon".into()), Role::User);
//! let oauth_user = User::new_oauth(&profile, random_password_hash);
//! ```

pub mod user;

pub use user::{LinkedServices, Role, User};
