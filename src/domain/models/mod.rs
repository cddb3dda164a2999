//! # Domain Models
//!
//! 영속되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 요청에 붙는 인증 사용자 정보
//! - [`token`] - JWT 클레임
//! - [`oauth`] - 소셜 프로필

pub mod auth;
pub mod token;
pub mod oauth;
