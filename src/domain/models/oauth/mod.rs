//! # OAuth Models
//!
//! 소셜 로그인 프로바이더의 프로필 응답과 공통 프로필 모델입니다.

pub mod oauth_profile;

pub use oauth_profile::{FacebookProfile, GoogleUserInfo, OAuthProfile};
